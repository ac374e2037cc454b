//! Cookie based login for the HTML pages

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::{
    api::AUTH_COOKIE,
    error::{AppError, AppResult},
    forms::LoginForm,
    urls, AppState,
};

use super::{found, templates};

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Only same-site absolute paths are followed after login
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => urls::INDEX,
    }
}

pub async fn login_form(Query(query): Query<NextQuery>) -> Html<String> {
    Html(templates::login(Some(safe_next(query.next.as_deref())), None))
}

/// Check credentials, store the JWT in a cookie and go to `next`
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let next = safe_next(form.next.as_deref()).to_string();

    match state
        .services
        .users
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok((token, _)) => {
            let cookie = Cookie::build((AUTH_COOKIE, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            Ok((jar.add(cookie), found(&next)).into_response())
        }
        Err(AppError::Authentication(_)) => Ok(Html(templates::login(
            Some(&next),
            Some("Your username and password didn't match. Please try again."),
        ))
        .into_response()),
        Err(e) => Err(e),
    }
}

pub async fn logout(jar: CookieJar) -> Response {
    let cookie = Cookie::build((AUTH_COOKIE, "")).path("/");
    (jar.remove(cookie), found(urls::LOGIN)).into_response()
}
