//! Server-rendered catalog pages

pub mod accounts;
pub mod catalog;
pub mod loans;
pub mod templates;

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDate};

/// 302 Found redirect
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Calendar date used by loan rules
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
