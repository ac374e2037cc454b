//! Shared helpers for the integration tests: an in-memory app and catalog fixtures

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::{Duration, Local, NaiveDate};
use tower::ServiceExt;

use locallibrary_server::{
    config::{AppConfig, DatabaseConfig},
    create_router,
    models::{
        author::CreateAuthor, book::CreateBook, book_instance::CreateBookInstance,
        user::CreateUser, Author, Book, BookInstance, Genre, Language, LoanStatus, Permission,
        User,
    },
    repository::Repository,
    AppState,
};

pub struct TestApp {
    pub repository: Repository,
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = AppConfig {
            database: DatabaseConfig::in_memory(),
            ..AppConfig::default()
        };
        let repository = Repository::connect(&config.database)
            .await
            .expect("Failed to open in-memory database");
        let state = AppState::new(config, repository.clone());
        let router = create_router(state.clone());

        Self {
            repository,
            state,
            router,
        }
    }

    /// Create a user and return it with a bearer token
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        permissions: Vec<Permission>,
    ) -> (User, String) {
        let users = &self.state.services.users;
        let user = users
            .create_user(CreateUser {
                username: username.to_string(),
                password: password.to_string(),
                permissions,
            })
            .await
            .expect("Failed to create user");
        let (token, _) = users
            .authenticate(username, password)
            .await
            .expect("Failed to log in");
        (user, token)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, token: Option<&str>, body: &str) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(request.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// One book with its author, language and genre
pub struct CatalogFixture {
    pub genre: Genre,
    pub language: Language,
    pub author: Author,
    pub book: Book,
}

impl CatalogFixture {
    pub async fn create(
        app: &TestApp,
        genre: &str,
        language: &str,
        author: (&str, &str),
        title: &str,
        isbn: &str,
    ) -> Self {
        let genre = app.repository.genres.create(genre).await.unwrap();
        let language = app.repository.languages.create(language).await.unwrap();
        let catalog = &app.state.services.catalog;
        let author = catalog
            .create_author(CreateAuthor::new(author.0, author.1))
            .await
            .unwrap();
        let book = catalog
            .create_book(CreateBook {
                title: title.to_string(),
                author_id: Some(author.id),
                summary: format!("Summary of {}", title),
                isbn: isbn.to_string(),
                language_id: Some(language.id),
                genre_ids: vec![genre.id],
            })
            .await
            .unwrap();

        Self {
            genre,
            language,
            author,
            book,
        }
    }

    pub async fn add_instance(
        &self,
        app: &TestApp,
        imprint: &str,
        due_back: Option<NaiveDate>,
        status: LoanStatus,
    ) -> BookInstance {
        app.state
            .services
            .catalog
            .create_book_instance(CreateBookInstance {
                book_id: self.book.id,
                imprint: imprint.to_string(),
                due_back,
                status,
                borrower_id: None,
            })
            .await
            .unwrap()
    }
}
