//! Users repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{Permission, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Sqlite>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT id, username, password_hash FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Insert a user whose password is already hashed
    pub async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        if self.get_by_username(username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let id = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    /// Permission codenames granted to a user
    pub async fn get_permissions(&self, user_id: i64) -> AppResult<Vec<String>> {
        let codenames: Vec<String> = sqlx::query_scalar(
            "SELECT codename FROM user_permissions WHERE user_id = ? ORDER BY codename",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(codenames)
    }

    pub async fn grant_permission(&self, user_id: i64, permission: Permission) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO user_permissions (user_id, codename) VALUES (?, ?)")
            .bind(user_id)
            .bind(permission.codename())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
