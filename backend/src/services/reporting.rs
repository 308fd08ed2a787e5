//! Inventory reporting service
//!
//! Aggregated dashboard figures over the current inventory and recent
//! movement activity.

use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::material::MaterialService;
use crate::services::movement::MovementService;
use shared::models::Material;

/// Reporting window for movement counts, in days
const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    materials: MaterialService,
    movements: MovementService,
}

/// Inventory summary for the dashboard
#[derive(Debug, Serialize)]
pub struct InventorySummary {
    /// Total units on hand across active materials
    pub total_stock: i64,
    /// Number of active materials in the catalog
    pub material_count: i64,
    /// Active materials at or below their minimum stock
    pub low_stock_count: i64,
    /// Movements registered in the trailing 30 days
    pub recent_movement_count: i64,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            materials: MaterialService::new(db.clone()),
            movements: MovementService::new(db),
        }
    }

    /// Build the inventory summary
    pub async fn summary(&self) -> AppResult<InventorySummary> {
        let active = self.materials.list_active().await?;
        let low_stock_count = active.iter().filter(|m| m.is_low_stock()).count() as i64;

        Ok(InventorySummary {
            total_stock: self.materials.total_stock().await?,
            material_count: active.len() as i64,
            low_stock_count,
            recent_movement_count: self.movements.count_since(ACTIVITY_WINDOW_DAYS).await?,
        })
    }

    /// Active materials at or below their minimum stock, lowest first
    pub async fn low_stock(&self) -> AppResult<Vec<Material>> {
        self.materials.list_low_stock().await
    }
}
