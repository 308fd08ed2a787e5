//! HTTP handlers for demand analytics endpoints
//!
//! All analytics routes are manager only. Demand analysis is advisory: a
//! material with no usable history returns a JSON null body rather than an
//! error status.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::analytics::{AnalyticsService, ModelHealth};
use crate::services::material::MaterialService;
use crate::AppState;
use shared::models::{DemandAnalysis, SmartRecommendation};

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    pub days_back: Option<i64>,
}

/// Demand analysis for one material
pub async fn analyze_demand(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Query(query): Query<AnalysisQuery>,
) -> AppResult<Json<Option<DemandAnalysis>>> {
    current_user.0.require_manager()?;
    let days_back = query
        .days_back
        .unwrap_or(state.config.analytics.default_lookback_days);
    let service = AnalyticsService::postgres(state.db);
    let analysis = service.analyze_demand(material_id, days_back).await;
    Ok(Json(analysis))
}

/// Portfolio-wide recommendations, ranked by severity
pub async fn recommendations(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SmartRecommendation>>> {
    current_user.0.require_manager()?;
    let service = AnalyticsService::postgres(state.db);
    let recommendations = service.generate_recommendations().await;
    Ok(Json(recommendations))
}

/// Model health figures for the analytics dashboard
pub async fn model_health(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ModelHealth>> {
    current_user.0.require_manager()?;
    let materials = MaterialService::new(state.db).list_active().await?;
    Ok(Json(ModelHealth::sample(&materials)))
}
