//! Book instances repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstanceRow, CreateBookInstance},
        BookInstance, LoanStatus,
    },
};

const INSTANCE_SELECT: &str = r#"
    SELECT bi.id, bi.book_id, b.title AS book_title, bi.imprint,
           bi.due_back, bi.status, bi.borrower_id
    FROM book_instances bi
    JOIN books b ON b.id = bi.book_id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Sqlite>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book instance by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstanceRow>(&format!("{} WHERE bi.id = ?", INSTANCE_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))?
            .try_into()
    }

    /// Copies of a book, soonest due first
    pub async fn list_for_book(&self, book_id: i64) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "{} WHERE bi.book_id = ? ORDER BY bi.due_back, bi.imprint",
            INSTANCE_SELECT
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookInstance::try_from).collect()
    }

    /// Every copy currently on loan, soonest due first
    pub async fn list_on_loan(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "{} WHERE bi.status = ? ORDER BY bi.due_back",
            INSTANCE_SELECT
        ))
        .bind(LoanStatus::OnLoan.code())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookInstance::try_from).collect()
    }

    /// Copies on loan to one borrower, soonest due first
    pub async fn list_on_loan_to(&self, borrower_id: i64) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "{} WHERE bi.status = ? AND bi.borrower_id = ? ORDER BY bi.due_back",
            INSTANCE_SELECT
        ))
        .bind(LoanStatus::OnLoan.code())
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookInstance::try_from).collect()
    }

    pub async fn create(&self, instance: &CreateBookInstance) -> AppResult<BookInstance> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, due_back, status, borrower_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.due_back)
        .bind(instance.status.code())
        .bind(instance.borrower_id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Set the due date of a copy
    pub async fn update_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<()> {
        let updated = sqlx::query("UPDATE book_instances SET due_back = ? WHERE id = ?")
            .bind(due_back)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_with_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = ?")
                .bind(status.code())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn delete_all(&self) -> AppResult<u64> {
        let deleted = sqlx::query("DELETE FROM book_instances")
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted)
    }
}
