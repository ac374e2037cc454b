//! Books repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{book::CreateBook, Book, BookShort},
};

const BOOK_COLUMNS: &str = "id, title, author_id, summary, isbn, language_id";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE title = ? ORDER BY id LIMIT 1",
            BOOK_COLUMNS
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// One page of books with their author formatted as "last, first"
    pub async fn list_short(&self, limit: i64, offset: i64) -> AppResult<Vec<BookShort>> {
        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title, b.author_id,
                   CASE WHEN a.id IS NULL THEN NULL
                        ELSE a.last_name || ', ' || a.first_name END AS author
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            ORDER BY b.title, b.id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    pub async fn list_by_author(&self, author_id: i64) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE author_id = ? ORDER BY title, id",
            BOOK_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Create a book and link its genres in one transaction
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO books (title, author_id, summary, isbn, language_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.language_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT OR IGNORE INTO book_genres (book_id, genre_id) VALUES (?, ?)")
                .bind(id)
                .bind(*genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Book {
            id,
            title: book.title.clone(),
            author_id: book.author_id,
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            language_id: book.language_id,
        })
    }

    /// Link an existing genre to a book
    pub async fn add_genre(&self, book_id: i64, genre_id: i64) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO book_genres (book_id, genre_id) VALUES (?, ?)")
            .bind(book_id)
            .bind(genre_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Delete every book and its genre links
    pub async fn delete_all(&self) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_genres")
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM books")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted)
    }
}
