use axum::{extract::{Path, State}, http::StatusCode, Json};
use tracing::info;

use models::account::{self, AccountDraft};

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/accounts", tag = "accounts",
    responses(
        (status = 200, description = "All accounts", body = [crate::openapi::AccountDoc]),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<account::Model>>, JsonApiError> {
    let list = state.accounts.list_accounts().await?;
    info!(count = list.len(), "list accounts");
    Ok(Json(list))
}

/// Unknown ids answer 200 with a `null` body.
#[utoipa::path(
    get, path = "/accounts/{account_id}", tag = "accounts",
    params(("account_id" = i64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "The account, or null when absent", body = crate::openapi::AccountDoc),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Option<account::Model>>, JsonApiError> {
    Ok(Json(state.accounts.get_account(account_id).await?))
}

#[utoipa::path(
    post, path = "/accounts", tag = "accounts",
    request_body = crate::openapi::AccountDraftDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AccountDoc),
        (status = 422, description = "Missing or mistyped field"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<AccountDraft>,
) -> Result<(StatusCode, Json<account::Model>), JsonApiError> {
    let created = state.accounts.create_account(draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replaces iban, bicSwift and clientId. Unknown ids answer 200 with `null` and create nothing.
#[utoipa::path(
    put, path = "/accounts/{account_id}", tag = "accounts",
    params(("account_id" = i64, Path, description = "Account ID")),
    request_body = crate::openapi::AccountDraftDoc,
    responses(
        (status = 200, description = "Updated account, or null when absent", body = crate::openapi::AccountDoc),
        (status = 422, description = "Missing or mistyped field"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    Json(draft): Json<AccountDraft>,
) -> Result<Json<Option<account::Model>>, JsonApiError> {
    Ok(Json(state.accounts.update_account(account_id, draft).await?))
}

#[utoipa::path(
    delete, path = "/accounts/{account_id}", tag = "accounts",
    params(("account_id" = i64, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Deleted, or nothing to delete"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    state.accounts.delete_account(account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
