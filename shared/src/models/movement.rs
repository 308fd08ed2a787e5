//! Stock movement models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single signed stock movement for a material
///
/// Positive `delta` is inbound stock, negative is outbound. Movements are
/// immutable once recorded; corrections are new movements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub material_id: Uuid,
    /// Signed quantity change (positive = in, negative = out)
    pub delta: i64,
    pub recorded_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
}

impl StockMovement {
    /// Absolute movement magnitude, as used by consumption analysis
    pub fn magnitude(&self) -> f64 {
        self.delta.unsigned_abs() as f64
    }

    pub fn is_inbound(&self) -> bool {
        self.delta > 0
    }

    pub fn is_outbound(&self) -> bool {
        self.delta < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_is_absolute() {
        let movement = StockMovement {
            id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
            delta: -25,
            recorded_at: Utc::now(),
            user_id: None,
        };
        assert_eq!(movement.magnitude(), 25.0);
        assert!(movement.is_outbound());
        assert!(!movement.is_inbound());
    }

    #[test]
    fn test_zero_delta_is_neither_direction() {
        let movement = StockMovement {
            id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
            delta: 0,
            recorded_at: Utc::now(),
            user_id: None,
        };
        assert!(!movement.is_inbound());
        assert!(!movement.is_outbound());
        assert_eq!(movement.magnitude(), 0.0);
    }
}
