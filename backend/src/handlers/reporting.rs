//! HTTP handlers for inventory reporting endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::reporting::{InventorySummary, ReportingService};
use crate::AppState;
use shared::models::Material;

/// Inventory summary for the dashboard (logistics lead or manager)
pub async fn inventory_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<InventorySummary>> {
    current_user.0.require_logistics()?;
    let service = ReportingService::new(state.db);
    let summary = service.summary().await?;
    Ok(Json(summary))
}

/// Active materials at or below their minimum stock (logistics lead or
/// manager)
pub async fn low_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Material>>> {
    current_user.0.require_logistics()?;
    let service = ReportingService::new(state.db);
    let materials = service.low_stock().await?;
    Ok(Json(materials))
}
