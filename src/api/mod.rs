//! JSON API handlers and request authentication

pub mod auth;
pub mod catalog;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::{error::AppError, models::UserClaims, AppState};

/// Cookie holding the JWT of a user logged in through the HTML login form
pub const AUTH_COOKIE: &str = "token";

/// Extractor for authenticated user from a bearer token or the auth cookie
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTHORIZATION) {
            Some(value) => {
                let header = value
                    .to_str()
                    .map_err(|_| AppError::Authentication("Invalid authorization header".to_string()))?;
                header
                    .strip_prefix("Bearer ")
                    .ok_or_else(|| {
                        AppError::Authentication("Invalid authorization header format".to_string())
                    })?
                    .to_string()
            }
            None => CookieJar::from_headers(&parts.headers)
                .get(AUTH_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| AppError::Authentication("Login required".to_string()))?,
        };

        let claims = state.services.users.verify_token(&token)?;

        Ok(AuthenticatedUser(claims))
    }
}
