//! Languages repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::Language,
};

#[derive(Clone)]
pub struct LanguagesRepository {
    pool: Pool<Sqlite>,
}

impl LanguagesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get language by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Language> {
        sqlx::query_as::<_, Language>("SELECT id, name FROM languages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Language with id {} not found", id)))
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Language>> {
        let language =
            sqlx::query_as::<_, Language>("SELECT id, name FROM languages WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(language)
    }

    /// Create a language; names are unique
    pub async fn create(&self, name: &str) -> AppResult<Language> {
        if self.find_by_name(name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Language '{}' already exists",
                name
            )));
        }

        let id = sqlx::query("INSERT INTO languages (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(Language {
            id,
            name: name.to_string(),
        })
    }

    pub async fn delete_all(&self) -> AppResult<u64> {
        let deleted = sqlx::query("DELETE FROM languages")
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted)
    }
}
