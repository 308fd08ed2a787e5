//! HTTP handlers for the material catalog endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::material::{CreateMaterialInput, MaterialService, UpdateMaterialInput};
use crate::AppState;
use shared::models::Material;

#[derive(Debug, Deserialize)]
pub struct ListMaterialsQuery {
    pub category: Option<String>,
    /// Name prefix search; takes precedence over category
    pub q: Option<String>,
}

/// List materials, with optional category filter or name search
pub async fn list_materials(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListMaterialsQuery>,
) -> AppResult<Json<Vec<Material>>> {
    let service = MaterialService::new(state.db);
    let materials = match query.q {
        Some(q) => service.search(&q).await?,
        None => service.list(query.category.as_deref()).await?,
    };
    Ok(Json(materials))
}

/// Get a material by id
pub async fn get_material(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service.get(id).await?;
    Ok(Json(material))
}

/// Look up a material from a scanned barcode or QR payload
pub async fn lookup_by_code(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(code): Path<String>,
) -> AppResult<Json<Option<Material>>> {
    let service = MaterialService::new(state.db);
    let material = service.find_by_code(&code).await?;
    Ok(Json(material))
}

/// Create a material (logistics lead or manager)
pub async fn create_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateMaterialInput>,
) -> AppResult<Json<Material>> {
    current_user.0.require_logistics()?;
    let service = MaterialService::new(state.db);
    let material = service.create(input).await?;
    Ok(Json(material))
}

/// Update a material (logistics lead or manager)
pub async fn update_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateMaterialInput>,
) -> AppResult<Json<Material>> {
    current_user.0.require_logistics()?;
    let service = MaterialService::new(state.db);
    let material = service.update(id, input).await?;
    Ok(Json(material))
}

/// Delete a material (logistics lead or manager)
pub async fn delete_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    current_user.0.require_logistics()?;
    let service = MaterialService::new(state.db);
    service.delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
