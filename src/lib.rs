//! LocalLibrary catalog server
//!
//! A library catalog (authors, books, genres and copies) served as HTML pages
//! and a small JSON API, with a loan renewal workflow for librarians.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;
pub mod urls;
pub mod web;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: Repository) -> Self {
        let services = Services::new(repository, &config);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Catalog
        .route("/catalog/counts", get(api::catalog::get_counts))
        .route("/authors", get(api::catalog::list_authors))
        .route("/authors/:id", get(api::catalog::get_author))
        .route("/books", get(api::catalog::list_books))
        .route("/books/:id", get(api::catalog::get_book))
        .route("/book-instances/:id", get(api::catalog::get_book_instance))
        .with_state(state.clone());

    // Server-rendered pages
    let pages = Router::new()
        .route("/catalog/", get(web::catalog::index))
        .route("/catalog/books/", get(web::catalog::book_list))
        .route("/catalog/book/:id/", get(web::catalog::book_detail))
        .route("/catalog/authors/", get(web::catalog::author_list))
        .route("/catalog/author/:id/", get(web::catalog::author_detail))
        .route("/catalog/mybooks/", get(web::loans::my_borrowed))
        .route("/catalog/borrowed/", get(web::loans::all_borrowed))
        .route(
            "/catalog/book/:id/renew/",
            get(web::loans::renew_book_form).post(web::loans::renew_book_submit),
        )
        .route(
            "/accounts/login/",
            get(web::accounts::login_form).post(web::accounts::login_submit),
        )
        .route("/accounts/logout/", post(web::accounts::logout))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(pages)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
