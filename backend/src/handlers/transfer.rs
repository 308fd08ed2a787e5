//! HTTP handlers for warehouse transfer endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::transfer::{CreateTransferInput, TransferService};
use crate::AppState;
use shared::models::{Transfer, TransferStatus};

#[derive(Debug, Deserialize)]
pub struct ListTransfersQuery {
    pub status: Option<TransferStatus>,
}

/// List transfers, optionally filtered by status (logistics lead or manager)
pub async fn list_transfers(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListTransfersQuery>,
) -> AppResult<Json<Vec<Transfer>>> {
    current_user.0.require_logistics()?;
    let service = TransferService::new(state.db);
    let transfers = service.list(query.status).await?;
    Ok(Json(transfers))
}

/// Get a transfer by id (logistics lead or manager)
pub async fn get_transfer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Transfer>> {
    current_user.0.require_logistics()?;
    let service = TransferService::new(state.db);
    let transfer = service.get(id).await?;
    Ok(Json(transfer))
}

/// Request a transfer (logistics lead or manager)
pub async fn create_transfer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateTransferInput>,
) -> AppResult<Json<Transfer>> {
    current_user.0.require_logistics()?;
    let service = TransferService::new(state.db);
    let transfer = service.create(&current_user.0.email, input).await?;
    Ok(Json(transfer))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusInput {
    pub status: TransferStatus,
}

/// Advance a transfer through its workflow (logistics lead or manager)
pub async fn set_transfer_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<SetStatusInput>,
) -> AppResult<Json<Transfer>> {
    current_user.0.require_logistics()?;
    let service = TransferService::new(state.db);
    let transfer = service
        .set_status(id, input.status, &current_user.0.email)
        .await?;
    Ok(Json(transfer))
}
