//! Catalog pages, cookie login and the JSON API driven through the router

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};

use common::{body_string, days_from_today, CatalogFixture, TestApp};
use locallibrary_server::{
    models::{book_instance::CreateBookInstance, LoanStatus, Permission},
    seed, urls,
};

async fn shining(app: &TestApp) -> CatalogFixture {
    CatalogFixture::create(
        app,
        "Horror",
        "English",
        ("Stephen", "King"),
        "The Shining",
        "9780307743657",
    )
    .await
}

#[tokio::test]
async fn test_index_shows_counts() {
    let app = TestApp::new().await;
    let fixture = shining(&app).await;
    fixture
        .add_instance(&app, "1st", None, LoanStatus::Available)
        .await;
    fixture
        .add_instance(&app, "2nd", Some(days_from_today(3)), LoanStatus::OnLoan)
        .await;

    let counts = app.state.services.catalog.counts().await.unwrap();
    assert_eq!(counts.num_books, 1);
    assert_eq!(counts.num_instances, 2);
    assert_eq!(counts.num_instances_available, 1);
    assert_eq!(counts.num_authors, 1);
    assert_eq!(counts.num_genres, 1);

    let response = app.get(urls::INDEX, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("<strong>Copies available:</strong> 1"));
}

#[tokio::test]
async fn test_author_detail_page_lists_books() {
    let app = TestApp::new().await;
    let fixture = shining(&app).await;

    let response = app.get(&fixture.author.get_absolute_url(), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("King, Stephen"));
    assert!(body.contains(&fixture.book.get_absolute_url()));
}

#[tokio::test]
async fn test_book_detail_page_and_missing_book() {
    let app = TestApp::new().await;
    let fixture = shining(&app).await;
    fixture
        .add_instance(&app, "Doubleday", Some(days_from_today(-2)), LoanStatus::OnLoan)
        .await;

    let response = app.get(&fixture.book.get_absolute_url(), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Title: The Shining"));
    assert!(body.contains("Horror"));
    assert!(body.contains("Doubleday"));
    assert!(body.contains("text-danger"));

    let response = app.get(&urls::book_detail(fixture.book.id + 100), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lists_paginate() {
    let app = TestApp::new().await;
    seed::populate(&app.repository).await.unwrap();

    let response = app.get(urls::BOOKS, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Foundation"));

    let response = app.get(&format!("{}?page=2", urls::AUTHORS), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get(urls::AUTHORS, None).await;
    assert!(body_string(response).await.contains("Asimov, Isaac"));
}

#[tokio::test]
async fn test_my_borrowed_lists_only_own_loans() {
    let app = TestApp::new().await;
    let fixture = shining(&app).await;
    let (reader, token) = app.create_user("reader", "pass12345", vec![]).await;

    app.state
        .services
        .catalog
        .create_book_instance(CreateBookInstance {
            book_id: fixture.book.id,
            imprint: "Anchor".to_string(),
            due_back: Some(days_from_today(5)),
            status: LoanStatus::OnLoan,
            borrower_id: Some(reader.id),
        })
        .await
        .unwrap();
    fixture
        .add_instance(&app, "Doubleday", Some(days_from_today(9)), LoanStatus::OnLoan)
        .await;

    let loans = app.state.services.loans.borrowed_by(reader.id).await.unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].imprint, "Anchor");

    let response = app.get(urls::MY_BORROWED, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(&days_from_today(5).to_string()));
    assert!(!body.contains(&days_from_today(9).to_string()));

    let response = app.get(urls::MY_BORROWED, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_all_borrowed_requires_permission() {
    let app = TestApp::new().await;
    let fixture = shining(&app).await;
    let instance = fixture
        .add_instance(&app, "Doubleday", Some(days_from_today(2)), LoanStatus::OnLoan)
        .await;
    let (_, librarian) = app
        .create_user("librarian", "pass12345", vec![Permission::CanMarkReturned])
        .await;
    let (_, reader) = app.create_user("reader", "pass12345", vec![]).await;

    let response = app.get(urls::ALL_BORROWED, Some(&reader)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.get(urls::ALL_BORROWED, Some(&librarian)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(&urls::renew_book_librarian(instance.id)));
}

#[tokio::test]
async fn test_cookie_login_flow() {
    let app = TestApp::new().await;
    app.create_user("librarian", "pass12345", vec![Permission::CanMarkReturned])
        .await;

    let response = app
        .post_form(
            urls::LOGIN,
            None,
            "username=librarian&password=wrong&next=%2Fcatalog%2Fborrowed%2F",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("didn&#x27;t match"));

    let response = app
        .post_form(
            urls::LOGIN,
            None,
            "username=librarian&password=pass12345&next=%2Fcatalog%2Fborrowed%2F",
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], urls::ALL_BORROWED);

    let set_cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let request = Request::builder()
        .uri(urls::ALL_BORROWED)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_login_and_me() {
    let app = TestApp::new().await;
    app.create_user("librarian", "pass12345", vec![Permission::CanMarkReturned])
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"username": "librarian", "password": "pass12345"}).to_string(),
        ))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["permissions"][0], "can_mark_returned");
    let token = body["token"].as_str().unwrap().to_string();

    let response = app.get("/api/v1/auth/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["username"], "librarian");

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"username": "librarian", "password": "nope"}).to_string(),
        ))
        .unwrap();
    assert_eq!(app.send(request).await.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/api/v1/auth/me", Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_catalog_endpoints() {
    let app = TestApp::new().await;
    let fixture = shining(&app).await;
    let instance = fixture
        .add_instance(&app, "Doubleday", Some(days_from_today(4)), LoanStatus::OnLoan)
        .await;

    let response = app.get("/api/v1/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "healthy");

    let response = app.get("/api/v1/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get(&format!("/api/v1/books/{}", fixture.book.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["book"]["title"], "The Shining");
    assert_eq!(body["genres"][0]["name"], "Horror");
    assert_eq!(body["instances"][0]["status"], "o");

    let response = app
        .get(&format!("/api/v1/book-instances/{}", instance.id), None)
        .await;
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["book_title"], "The Shining");
    assert_eq!(body["due_back"], days_from_today(4).to_string());

    let response = app.get("/api/v1/authors", None).await;
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["last_name"], "King");

    let response = app.get("/api/v1/authors/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("POST")
        .uri(urls::LOGOUT)
        .header(header::COOKIE, "token=stale")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], urls::LOGIN);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
}
