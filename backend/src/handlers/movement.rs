//! HTTP handlers for stock movement endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::movement::{MovementService, RegisterMovementInput};
use crate::AppState;
use shared::models::StockMovement;
use shared::types::{PaginatedResponse, Pagination};

/// Register a stock movement; any authenticated role may record one
pub async fn register_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RegisterMovementInput>,
) -> AppResult<Json<StockMovement>> {
    let service = MovementService::new(state.db);
    let movement = service.register(current_user.0.user_id, input).await?;
    Ok(Json(movement))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub days_back: Option<i64>,
}

/// Movement history for one material, oldest first
pub async fn material_history(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let days_back = query
        .days_back
        .unwrap_or(state.config.analytics.default_lookback_days);
    let service = MovementService::new(state.db);
    let movements = service.history(material_id, days_back).await?;
    Ok(Json(movements))
}

/// Most recent movements across all materials, newest first
pub async fn recent_movements(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<StockMovement>>> {
    let service = MovementService::new(state.db);
    let movements = service.recent(pagination).await?;
    Ok(Json(movements))
}
