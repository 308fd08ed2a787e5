//! Business logic services

pub mod analytics;
pub mod auth;
pub mod material;
pub mod movement;
pub mod project;
pub mod provider;
pub mod reporting;
pub mod transfer;

pub use analytics::{AnalyticsService, AnalyticsStore, PgAnalyticsStore};
pub use auth::AuthService;
pub use material::MaterialService;
pub use movement::MovementService;
pub use project::ProjectService;
pub use provider::ProviderService;
pub use reporting::ReportingService;
pub use transfer::TransferService;
