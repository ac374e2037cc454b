//! Catalog read endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, BookDetails, BookInstance, BookShort},
    services::catalog::{AuthorDetails, CatalogCounts, Page},
    AppState,
};

/// Pagination query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
}

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
#[aliases(PaginatedBooks = PaginatedResponse<BookShort>, PaginatedAuthors = PaginatedResponse<Author>)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Records of this page
    pub items: Vec<T>,
    /// Total number of records
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Records per page
    pub per_page: i64,
}

impl<T> From<Page<T>> for PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    fn from(page: Page<T>) -> Self {
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
        }
    }
}

/// Catalog record counts
#[utoipa::path(
    get,
    path = "/catalog/counts",
    tag = "catalog",
    responses(
        (status = 200, description = "Record counts", body = CatalogCounts)
    )
)]
pub async fn get_counts(State(state): State<AppState>) -> AppResult<Json<CatalogCounts>> {
    Ok(Json(state.services.catalog.counts().await?))
}

/// List authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "catalog",
    params(PageQuery),
    responses(
        (status = 200, description = "Authors", body = PaginatedAuthors),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Author>>> {
    let page = state
        .services
        .catalog
        .list_authors(query.page.unwrap_or(1))
        .await?;
    Ok(Json(page.into()))
}

/// Get an author and their books
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "catalog",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetails),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AuthorDetails>> {
    Ok(Json(state.services.catalog.get_author(id).await?))
}

/// List books
#[utoipa::path(
    get,
    path = "/books",
    tag = "catalog",
    params(PageQuery),
    responses(
        (status = 200, description = "Books", body = PaginatedBooks),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BookShort>>> {
    let page = state
        .services
        .catalog
        .list_books(query.page.unwrap_or(1))
        .await?;
    Ok(Json(page.into()))
}

/// Get a book with its genres and copies
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "catalog",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookDetails>> {
    Ok(Json(state.services.catalog.get_book(id).await?))
}

/// Get a book instance
#[utoipa::path(
    get,
    path = "/book-instances/{id}",
    tag = "catalog",
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Book instance", body = BookInstance),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstance>> {
    Ok(Json(state.services.catalog.get_book_instance(id).await?))
}
