//! Loan management service

use chrono::{Duration, NaiveDate};
use uuid::Uuid;
use validator::ValidationError;

use crate::{
    config::CatalogConfig,
    error::AppResult,
    forms::RenewBookForm,
    models::BookInstance,
    repository::Repository,
};

/// Result of a renewal submission
#[derive(Debug)]
pub enum RenewalOutcome {
    /// The new due date was saved
    Renewed(BookInstance),
    /// The submitted date was refused, nothing was saved
    Rejected {
        instance: BookInstance,
        error: ValidationError,
    },
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: CatalogConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    pub async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id).await
    }

    /// Copies on loan to a user
    pub async fn borrowed_by(&self, user_id: i64) -> AppResult<Vec<BookInstance>> {
        self.repository.book_instances.list_on_loan_to(user_id).await
    }

    /// Every copy on loan
    pub async fn all_borrowed(&self) -> AppResult<Vec<BookInstance>> {
        self.repository.book_instances.list_on_loan().await
    }

    /// Date pre-filled in the renewal form
    pub fn proposed_renewal_date(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::weeks(self.config.proposed_renewal_weeks)
    }

    pub fn renewal_max_weeks(&self) -> i64 {
        self.config.renewal_max_weeks
    }

    /// Validate a renewal form and, when valid, move the due date
    pub async fn renew(
        &self,
        instance_id: Uuid,
        form: &RenewBookForm,
        today: NaiveDate,
    ) -> AppResult<RenewalOutcome> {
        let mut instance = self.repository.book_instances.get_by_id(instance_id).await?;

        let due_back = match form.clean_renewal_date(today, self.config.renewal_max_weeks) {
            Ok(date) => date,
            Err(error) => {
                tracing::debug!(
                    "Renewal of {} refused for '{}': {}",
                    instance_id,
                    form.renewal_date,
                    error.code
                );
                return Ok(RenewalOutcome::Rejected { instance, error });
            }
        };

        self.repository
            .book_instances
            .update_due_back(instance_id, due_back)
            .await?;
        instance.due_back = Some(due_back);

        tracing::info!("Renewed {} until {}", instance, due_back);
        Ok(RenewalOutcome::Renewed(instance))
    }
}
