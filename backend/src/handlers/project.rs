//! HTTP handlers for construction project endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::project::{CreateProjectInput, ProjectService, UpdateProjectInput};
use crate::AppState;
use shared::models::{Project, ProjectStatus};

#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    pub status: Option<ProjectStatus>,
}

/// List projects, optionally filtered by status (logistics lead or manager)
pub async fn list_projects(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListProjectsQuery>,
) -> AppResult<Json<Vec<Project>>> {
    current_user.0.require_logistics()?;
    let service = ProjectService::new(state.db);
    let projects = service.list(query.status).await?;
    Ok(Json(projects))
}

/// Get a project by id (logistics lead or manager)
pub async fn get_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Project>> {
    current_user.0.require_logistics()?;
    let service = ProjectService::new(state.db);
    let project = service.get(id).await?;
    Ok(Json(project))
}

/// Create a project (logistics lead or manager)
pub async fn create_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProjectInput>,
) -> AppResult<Json<Project>> {
    current_user.0.require_logistics()?;
    let service = ProjectService::new(state.db);
    let project = service.create(input).await?;
    Ok(Json(project))
}

/// Update a project (logistics lead or manager)
pub async fn update_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProjectInput>,
) -> AppResult<Json<Project>> {
    current_user.0.require_logistics()?;
    let service = ProjectService::new(state.db);
    let project = service.update(id, input).await?;
    Ok(Json(project))
}

/// Delete a project (logistics lead or manager)
pub async fn delete_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    current_user.0.require_logistics()?;
    let service = ProjectService::new(state.db);
    service.delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
