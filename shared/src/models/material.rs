//! Material catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A construction material tracked in inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    /// Unique barcode/QR payload printed on the physical label
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    /// Current stock on hand; never negative
    pub quantity: i64,
    /// Unit of measure ("unidades", "kg", "m2", ...)
    pub unit: String,
    pub location: Option<String>,
    pub warehouse: Option<String>,
    pub unit_price: Option<Decimal>,
    pub provider_id: Option<Uuid>,
    /// Safety stock level; at or below this the material is "low stock"
    pub min_stock: i64,
    pub max_stock: i64,
    pub active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Material {
    /// Whether current stock is at or below the safety level
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }

    /// Whether current stock exceeds the configured maximum
    pub fn is_overstocked(&self) -> bool {
        self.quantity > self.max_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(quantity: i64, min_stock: i64, max_stock: i64) -> Material {
        Material {
            id: Uuid::new_v4(),
            code: "MAT-001".to_string(),
            name: "Cemento Portland Tipo I".to_string(),
            description: None,
            category: "cemento".to_string(),
            quantity,
            unit: "unidades".to_string(),
            location: None,
            warehouse: None,
            unit_price: None,
            provider_id: None,
            min_stock,
            max_stock,
            active: true,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(material(10, 10, 100).is_low_stock());
        assert!(material(0, 10, 100).is_low_stock());
        assert!(!material(11, 10, 100).is_low_stock());
    }

    #[test]
    fn test_overstock_boundary() {
        assert!(!material(100, 10, 100).is_overstocked());
        assert!(material(101, 10, 100).is_overstocked());
    }
}
