//! HTTP handlers for provider endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::provider::{CreateProviderInput, ProviderService, UpdateProviderInput};
use crate::AppState;
use shared::models::Provider;

#[derive(Debug, Deserialize)]
pub struct ListProvidersQuery {
    /// Name prefix search
    pub q: Option<String>,
}

/// List providers, with optional name search (logistics lead or manager)
pub async fn list_providers(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListProvidersQuery>,
) -> AppResult<Json<Vec<Provider>>> {
    current_user.0.require_logistics()?;
    let service = ProviderService::new(state.db);
    let providers = match query.q {
        Some(q) => service.search(&q).await?,
        None => service.list().await?,
    };
    Ok(Json(providers))
}

/// Get a provider by id (logistics lead or manager)
pub async fn get_provider(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Provider>> {
    current_user.0.require_logistics()?;
    let service = ProviderService::new(state.db);
    let provider = service.get(id).await?;
    Ok(Json(provider))
}

/// Create a provider (logistics lead or manager)
pub async fn create_provider(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProviderInput>,
) -> AppResult<Json<Provider>> {
    current_user.0.require_logistics()?;
    let service = ProviderService::new(state.db);
    let provider = service.create(input).await?;
    Ok(Json(provider))
}

/// Update a provider (logistics lead or manager)
pub async fn update_provider(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProviderInput>,
) -> AppResult<Json<Provider>> {
    current_user.0.require_logistics()?;
    let service = ProviderService::new(state.db);
    let provider = service.update(id, input).await?;
    Ok(Json(provider))
}

/// Deactivate a provider (logistics lead or manager)
pub async fn deactivate_provider(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    current_user.0.require_logistics()?;
    let service = ProviderService::new(state.db);
    service.deactivate(id).await?;
    Ok(Json(serde_json::json!({ "deactivated": true })))
}
