//! HTML form payloads and their validation rules

use std::borrow::Cow;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use validator::ValidationError;

/// Date formats accepted from form input, tried in order.
/// `%y` comes first: `%Y` would also accept a two digit year.
const DATE_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

/// Form for a librarian to renew a book instance
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenewBookForm {
    #[serde(default)]
    pub renewal_date: String,
}

impl RenewBookForm {
    /// Pre-filled form proposing `date`
    pub fn proposing(date: NaiveDate) -> Self {
        Self {
            renewal_date: date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Parse the renewal date and check it lies in `[today, today + max_weeks]`.
    pub fn clean_renewal_date(
        &self,
        today: NaiveDate,
        max_weeks: i64,
    ) -> Result<NaiveDate, ValidationError> {
        let date = parse_date(&self.renewal_date)
            .ok_or_else(|| field_error("invalid", "Enter a valid date."))?;

        if date < today {
            return Err(field_error(
                "renewal_in_past",
                "Invalid date - renewal in past",
            ));
        }

        if date > today + Duration::weeks(max_weeks) {
            return Err(field_error(
                "renewal_too_far",
                format!("Invalid date - renewal more than {} weeks ahead", max_weeks),
            ));
        }

        Ok(date)
    }
}

/// Login form of the HTML pages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Where to go once logged in
    #[serde(default)]
    pub next: Option<String>,
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
