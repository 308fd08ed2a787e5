//! HTTP request handlers

pub mod analytics;
pub mod auth;
pub mod health;
pub mod material;
pub mod movement;
pub mod project;
pub mod provider;
pub mod reporting;
pub mod transfer;

pub use analytics::{analyze_demand, model_health, recommendations};
pub use auth::{deactivate_user, list_users, login, register, set_role};
pub use health::health_check;
pub use material::{
    create_material, delete_material, get_material, list_materials, lookup_by_code,
    update_material,
};
pub use movement::{material_history, recent_movements, register_movement};
pub use project::{create_project, delete_project, get_project, list_projects, update_project};
pub use provider::{
    create_provider, deactivate_provider, get_provider, list_providers, update_provider,
};
pub use reporting::{inventory_summary, low_stock};
pub use transfer::{create_transfer, get_transfer, list_transfers, set_transfer_status};
