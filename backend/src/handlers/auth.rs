//! HTTP handlers for authentication and user management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{AuthService, LoginInput, LoginResponse, RegisterUserInput};
use crate::AppState;
use shared::models::{User, UserRole};

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let service = AuthService::new(state.db, &state.config);
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Register a new user (manager only)
pub async fn register(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RegisterUserInput>,
) -> AppResult<Json<User>> {
    current_user.0.require_manager()?;
    let service = AuthService::new(state.db, &state.config);
    let user = service.register(input).await?;
    Ok(Json(user))
}

/// List all users (manager only)
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    current_user.0.require_manager()?;
    let service = AuthService::new(state.db, &state.config);
    let users = service.list_users().await?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
pub struct SetRoleInput {
    pub role: UserRole,
}

/// Change a user's role (manager only)
pub async fn set_role(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<SetRoleInput>,
) -> AppResult<Json<User>> {
    current_user.0.require_manager()?;
    let service = AuthService::new(state.db, &state.config);
    let user = service.set_role(user_id, input.role).await?;
    Ok(Json(user))
}

/// Deactivate a user (manager only)
pub async fn deactivate_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    current_user.0.require_manager()?;
    let service = AuthService::new(state.db, &state.config);
    service.deactivate(user_id).await?;
    Ok(Json(serde_json::json!({ "deactivated": true })))
}
