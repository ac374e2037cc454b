//! Book instance (physical copy) model and loan status

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Loan status of a copy, stored as a single-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    #[default]
    #[serde(rename = "m")]
    Maintenance,
    #[serde(rename = "o")]
    OnLoan,
    #[serde(rename = "a")]
    Available,
    #[serde(rename = "r")]
    Reserved,
}

impl LoanStatus {
    pub fn code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            _ => Err(format!("Invalid loan status code: {}", s)),
        }
    }
}

/// Internal row structure for database queries (status as its raw code)
#[derive(Debug, Clone, FromRow)]
pub struct BookInstanceRow {
    id: Uuid,
    book_id: i64,
    book_title: String,
    imprint: String,
    due_back: Option<NaiveDate>,
    status: String,
    borrower_id: Option<i64>,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(AppError::Internal)?;
        Ok(BookInstance {
            id: row.id,
            book_id: row.book_id,
            book_title: row.book_title,
            imprint: row.imprint,
            due_back: row.due_back,
            status,
            borrower_id: row.borrower_id,
        })
    }
}

/// A specific copy of a book that can be borrowed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: i64,
    /// Title of the related book
    pub book_title: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i64>,
}

impl BookInstance {
    /// Whether the copy is overdue as of the local calendar date
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Local::now().date_naive())
    }

    /// A due date strictly before `today` is overdue; no due date never is.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        matches!(self.due_back, Some(due_back) if due_back < today)
    }
}

impl std::fmt::Display for BookInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.book_title)
    }
}

/// Create book instance request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: i64,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    #[serde(default)]
    pub status: LoanStatus,
    pub borrower_id: Option<i64>,
}
