//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{Author, BookInstance, Genre, Language};
use crate::urls;

/// Number of genres shown by [`display_genre`]
const DISPLAYED_GENRES: usize = 3;

/// Book title (not a specific copy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author_id: Option<i64>,
    pub summary: String,
    /// 13 character ISBN
    pub isbn: String,
    pub language_id: Option<i64>,
}

impl Book {
    /// URL of the book detail page
    pub fn get_absolute_url(&self) -> String {
        urls::book_detail(self.id)
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Book row for list views, with the author already formatted
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i64,
    pub title: String,
    pub author_id: Option<i64>,
    /// "last, first"
    pub author: Option<String>,
}

/// Book with its related records, for the detail page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub book: Book,
    pub author: Option<Author>,
    pub language: Option<Language>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

impl BookDetails {
    pub fn display_genre(&self) -> String {
        display_genre(&self.genres)
    }
}

/// Comma separated names of the first few genres
pub fn display_genre(genres: &[Genre]) -> String {
    genres
        .iter()
        .take(DISPLAYED_GENRES)
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub author_id: Option<i64>,
    #[validate(length(max = 1000, message = "Summary is limited to 1000 characters"))]
    pub summary: String,
    #[validate(length(equal = 13, message = "ISBN must have 13 characters"))]
    pub isbn: String,
    pub language_id: Option<i64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}
