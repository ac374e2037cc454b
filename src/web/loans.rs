//! Borrowed books and the librarian renewal form

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use uuid::Uuid;

use crate::{
    api::AuthenticatedUser,
    error::AppResult,
    forms::RenewBookForm,
    models::Permission,
    services::loans::RenewalOutcome,
    urls, AppState,
};

use super::{found, templates, today};

/// Copies on loan to the logged-in user
pub async fn my_borrowed(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Html<String>> {
    let instances = state.services.loans.borrowed_by(claims.user_id).await?;
    Ok(Html(templates::borrowed_list(
        "Borrowed books",
        &instances,
        today(),
        false,
    )))
}

/// Every copy on loan, for librarians
pub async fn all_borrowed(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Html<String>> {
    claims.require_permission(Permission::CanMarkReturned)?;

    let instances = state.services.loans.all_borrowed().await?;
    Ok(Html(templates::borrowed_list(
        "All Borrowed",
        &instances,
        today(),
        true,
    )))
}

/// Display the renewal form with a proposed date
pub async fn renew_book_form(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    claims.require_permission(Permission::CanMarkReturned)?;

    let loans = &state.services.loans;
    let instance = loans.get_instance(id).await?;
    let form = RenewBookForm::proposing(loans.proposed_renewal_date(today()));

    Ok(Html(templates::renew_book(
        &instance,
        &form,
        None,
        loans.renewal_max_weeks(),
    )))
}

/// Save a valid renewal and redirect, or redisplay the form with its error
pub async fn renew_book_submit(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Form(form): Form<RenewBookForm>,
) -> AppResult<Response> {
    claims.require_permission(Permission::CanMarkReturned)?;

    let loans = &state.services.loans;
    match loans.renew(id, &form, today()).await? {
        RenewalOutcome::Renewed(_) => Ok(found(urls::ALL_BORROWED)),
        RenewalOutcome::Rejected { instance, error } => Ok(Html(templates::renew_book(
            &instance,
            &form,
            Some(&error),
            loans.renewal_max_weeks(),
        ))
        .into_response()),
    }
}
