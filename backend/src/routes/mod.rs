//! Route definitions for the Construction Materials Inventory Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
///
/// The state handle is needed up front so the auth middleware can verify
/// tokens against the configured secret.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes
        .nest("/auth", auth_routes(state.clone()))
        // User management (protected, manager only)
        .nest("/users", user_routes(state.clone()))
        // Material catalog (protected)
        .nest("/materials", material_routes(state.clone()))
        // Stock movements (protected)
        .nest("/movements", movement_routes(state.clone()))
        // Demand analytics (protected, manager only)
        .nest("/analytics", analytics_routes(state.clone()))
        // Providers (protected)
        .nest("/providers", provider_routes(state.clone()))
        // Construction projects (protected)
        .nest("/projects", project_routes(state.clone()))
        // Warehouse transfers (protected)
        .nest("/transfers", transfer_routes(state.clone()))
        // Reporting (protected)
        .nest("/reports", reporting_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new().route("/login", post(handlers::login)).route(
        "/register",
        post(handlers::register)
            .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
    )
}

/// User management routes (protected, manager only)
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users))
        .route("/:user_id/role", put(handlers::set_role))
        .route("/:user_id/deactivate", post(handlers::deactivate_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Material catalog routes (protected)
fn material_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_materials).post(handlers::create_material),
        )
        .route(
            "/:material_id",
            get(handlers::get_material)
                .put(handlers::update_material)
                .delete(handlers::delete_material),
        )
        .route("/scan/:code", get(handlers::lookup_by_code))
        .route(
            "/:material_id/movements",
            get(handlers::material_history),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Stock movement routes (protected)
fn movement_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::recent_movements).post(handlers::register_movement),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Demand analytics routes (protected, manager only)
fn analytics_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/demand/:material_id", get(handlers::analyze_demand))
        .route("/recommendations", get(handlers::recommendations))
        .route("/model-health", get(handlers::model_health))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Provider routes (protected, logistics lead or manager)
fn provider_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_providers).post(handlers::create_provider),
        )
        .route(
            "/:provider_id",
            get(handlers::get_provider).put(handlers::update_provider),
        )
        .route(
            "/:provider_id/deactivate",
            post(handlers::deactivate_provider),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Project routes (protected, logistics lead or manager)
fn project_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/:project_id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Warehouse transfer routes (protected, logistics lead or manager)
fn transfer_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_transfers).post(handlers::create_transfer),
        )
        .route("/:transfer_id", get(handlers::get_transfer))
        .route("/:transfer_id/status", put(handlers::set_transfer_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Reporting routes (protected, logistics lead or manager)
fn reporting_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::inventory_summary))
        .route("/low-stock", get(handlers::low_stock))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
