//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, catalog, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLibrary API",
        version = "1.0.0",
        description = "Library catalog JSON API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Catalog
        catalog::get_counts,
        catalog::list_authors,
        catalog::get_author,
        catalog::list_books,
        catalog::get_book,
        catalog::get_book_instance,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Catalog
            catalog::PaginatedBooks,
            catalog::PaginatedAuthors,
            crate::services::catalog::CatalogCounts,
            crate::services::catalog::AuthorDetails,
            crate::models::Author,
            crate::models::Book,
            crate::models::BookShort,
            crate::models::BookDetails,
            crate::models::BookInstance,
            crate::models::LoanStatus,
            crate::models::Genre,
            crate::models::Language,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "catalog", description = "Catalog browsing")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
