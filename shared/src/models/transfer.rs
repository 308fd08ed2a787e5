//! Warehouse transfer models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A transfer of material between warehouses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub material_id: Uuid,
    /// Denormalized material name, shown in transfer listings
    pub material_name: String,
    pub quantity: i64,
    pub from_warehouse: String,
    pub to_warehouse: String,
    pub requested_by: String,
    pub reason: Option<String>,
    pub status: TransferStatus,
    pub requested_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub authorized_by: Option<String>,
}

/// Transfer workflow status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    InTransit,
    Completed,
    Cancelled,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::InTransit => "in_transit",
            TransferStatus::Completed => "completed",
            TransferStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a transfer may move from `self` to `next`.
    ///
    /// Pending -> InTransit -> Completed; Pending and InTransit may be
    /// cancelled; Completed and Cancelled are terminal.
    pub fn can_transition_to(&self, next: TransferStatus) -> bool {
        matches!(
            (self, next),
            (TransferStatus::Pending, TransferStatus::InTransit)
                | (TransferStatus::Pending, TransferStatus::Cancelled)
                | (TransferStatus::InTransit, TransferStatus::Completed)
                | (TransferStatus::InTransit, TransferStatus::Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Completed | TransferStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(TransferStatus::Pending.can_transition_to(TransferStatus::InTransit));
        assert!(TransferStatus::Pending.can_transition_to(TransferStatus::Cancelled));
        assert!(TransferStatus::InTransit.can_transition_to(TransferStatus::Completed));
        assert!(TransferStatus::InTransit.can_transition_to(TransferStatus::Cancelled));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!TransferStatus::Pending.can_transition_to(TransferStatus::Completed));
        assert!(!TransferStatus::Completed.can_transition_to(TransferStatus::Pending));
        assert!(!TransferStatus::Cancelled.can_transition_to(TransferStatus::InTransit));
        assert!(!TransferStatus::InTransit.can_transition_to(TransferStatus::Pending));
    }

    #[test]
    fn test_terminal_states() {
        assert!(TransferStatus::Completed.is_terminal());
        assert!(TransferStatus::Cancelled.is_terminal());
        assert!(!TransferStatus::Pending.is_terminal());
        assert!(!TransferStatus::InTransit.is_terminal());
    }
}
