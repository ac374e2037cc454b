//! Catalog browsing pages

use axum::{
    extract::{Path, Query, State},
    response::Html,
};

use crate::{api::catalog::PageQuery, error::AppResult, AppState};

use super::{templates, today};

/// Home page with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    Ok(Html(templates::index(&counts)))
}

pub async fn book_list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let page = state
        .services
        .catalog
        .list_books(query.page.unwrap_or(1))
        .await?;
    Ok(Html(templates::book_list(&page)))
}

pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let details = state.services.catalog.get_book(id).await?;
    Ok(Html(templates::book_detail(&details, today())))
}

pub async fn author_list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let page = state
        .services
        .catalog
        .list_authors(query.page.unwrap_or(1))
        .await?;
    Ok(Html(templates::author_list(&page)))
}

pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let details = state.services.catalog.get_author(id).await?;
    Ok(Html(templates::author_detail(&details)))
}
