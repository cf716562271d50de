use axum::{extract::{Path, State}, http::StatusCode, Json};
use tracing::info;

use models::card::{self, CardDraft, CardPatch};

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/cards", tag = "cards",
    responses(
        (status = 200, description = "All cards", body = [crate::openapi::CardDoc]),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<card::Model>>, JsonApiError> {
    let list = state.cards.list_all_cards().await?;
    info!(count = list.len(), "list cards");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/cards/{account_id}", tag = "cards",
    params(("account_id" = i64, Path, description = "Owning account ID; need not exist")),
    responses(
        (status = 200, description = "Cards of the account, possibly empty", body = [crate::openapi::CardDoc]),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn list_for_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<card::Model>>, JsonApiError> {
    let list = state.cards.list_cards_for_account(account_id).await?;
    info!(account_id, count = list.len(), "list cards for account");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/cards/by-id/{card_id}", tag = "cards",
    params(("card_id" = i64, Path, description = "Card ID")),
    responses(
        (status = 200, description = "The card, or null when absent", body = crate::openapi::CardDoc),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(card_id): Path<i64>,
) -> Result<Json<Option<card::Model>>, JsonApiError> {
    Ok(Json(state.cards.get_card(card_id).await?))
}

#[utoipa::path(
    post, path = "/cards", tag = "cards",
    request_body = crate::openapi::CardDraftDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CardDoc),
        (status = 422, description = "Missing or mistyped field"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<CardDraft>,
) -> Result<(StatusCode, Json<card::Model>), JsonApiError> {
    let created = state.cards.create_card(draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Only `cardAlias` is applied. Unknown ids answer 200 with `null`.
#[utoipa::path(
    put, path = "/cards/{card_id}", tag = "cards",
    params(("card_id" = i64, Path, description = "Card ID")),
    request_body = crate::openapi::CardPatchDoc,
    responses(
        (status = 200, description = "Updated card, or null when absent", body = crate::openapi::CardDoc),
        (status = 422, description = "Missing or mistyped field"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(card_id): Path<i64>,
    Json(patch): Json<CardPatch>,
) -> Result<Json<Option<card::Model>>, JsonApiError> {
    Ok(Json(state.cards.update_card(card_id, patch).await?))
}

#[utoipa::path(
    delete, path = "/cards/{card_id}", tag = "cards",
    params(("card_id" = i64, Path, description = "Card ID")),
    responses(
        (status = 204, description = "Deleted, or nothing to delete"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(card_id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    state.cards.delete_card(card_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
