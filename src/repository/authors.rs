//! Authors repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{author::CreateAuthor, Author},
};

const AUTHOR_COLUMNS: &str = "id, first_name, last_name, date_of_birth, date_of_death";

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE id = ?",
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    pub async fn find_by_name(&self, first_name: &str, last_name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE first_name = ? AND last_name = ?",
            AUTHOR_COLUMNS
        ))
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    /// One page of authors ordered by last then first name
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors ORDER BY last_name, first_name, id LIMIT ? OFFSET ?",
            AUTHOR_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let id = sqlx::query(
            r#"
            INSERT INTO authors (first_name, last_name, date_of_birth, date_of_death)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Author {
            id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        })
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn delete_all(&self) -> AppResult<u64> {
        let deleted = sqlx::query("DELETE FROM authors")
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted)
    }
}
