//! Warehouse transfer service
//!
//! Transfers move material between warehouses through a small state
//! machine: pending, in transit, completed, with cancellation allowed from
//! the two non-terminal states. Stock quantities are not touched; a
//! transfer relocates units, it does not consume them.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::material::MaterialService;
use shared::models::{Transfer, TransferStatus};
use shared::validation::sanitize_text;

/// Transfer service
#[derive(Clone)]
pub struct TransferService {
    db: PgPool,
    materials: MaterialService,
}

#[derive(Debug, FromRow)]
pub(crate) struct TransferRow {
    pub id: Uuid,
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity: i64,
    pub from_warehouse: String,
    pub to_warehouse: String,
    pub requested_by: String,
    pub reason: Option<String>,
    pub status: String,
    pub requested_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub authorized_by: Option<String>,
}

impl TransferRow {
    fn into_transfer(self) -> AppResult<Transfer> {
        let status = parse_status(&self.status)?;
        Ok(Transfer {
            id: self.id,
            material_id: self.material_id,
            material_name: self.material_name,
            quantity: self.quantity,
            from_warehouse: self.from_warehouse,
            to_warehouse: self.to_warehouse,
            requested_by: self.requested_by,
            reason: self.reason,
            status,
            requested_at: self.requested_at,
            completed_at: self.completed_at,
            notes: self.notes,
            authorized_by: self.authorized_by,
        })
    }
}

fn parse_status(raw: &str) -> AppResult<TransferStatus> {
    match raw {
        "pending" => Ok(TransferStatus::Pending),
        "in_transit" => Ok(TransferStatus::InTransit),
        "completed" => Ok(TransferStatus::Completed),
        "cancelled" => Ok(TransferStatus::Cancelled),
        other => Err(AppError::Internal(format!(
            "Unknown transfer status '{}' in database",
            other
        ))),
    }
}

const TRANSFER_COLUMNS: &str = "id, material_id, material_name, quantity, from_warehouse, \
     to_warehouse, requested_by, reason, status, requested_at, completed_at, notes, authorized_by";

/// Input for requesting a transfer
#[derive(Debug, Deserialize)]
pub struct CreateTransferInput {
    pub material_id: Uuid,
    pub quantity: i64,
    pub from_warehouse: String,
    pub to_warehouse: String,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl TransferService {
    /// Create a new TransferService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            materials: MaterialService::new(db.clone()),
            db,
        }
    }

    /// Request a transfer; validates the material exists and has enough
    /// stock on hand
    pub async fn create(&self, requested_by: &str, input: CreateTransferInput) -> AppResult<Transfer> {
        if input.quantity <= 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Transfer quantity must be positive".to_string(),
                message_es: "La cantidad a trasladar debe ser positiva".to_string(),
            });
        }
        if input.from_warehouse == input.to_warehouse {
            return Err(AppError::Validation {
                field: "to_warehouse".to_string(),
                message: "Source and destination warehouses must differ".to_string(),
                message_es: "El almacén de origen y destino deben ser distintos".to_string(),
            });
        }

        let reason = input
            .reason
            .as_deref()
            .map(sanitize_text)
            .transpose()
            .map_err(|msg| AppError::Validation {
                field: "reason".to_string(),
                message: msg.to_string(),
                message_es: "El motivo contiene caracteres no permitidos".to_string(),
            })?;
        let notes = input
            .notes
            .as_deref()
            .map(sanitize_text)
            .transpose()
            .map_err(|msg| AppError::Validation {
                field: "notes".to_string(),
                message: msg.to_string(),
                message_es: "Las notas contienen caracteres no permitidos".to_string(),
            })?;

        let material = self.materials.get(input.material_id).await?;
        if material.quantity < input.quantity {
            return Err(AppError::InsufficientStock(format!(
                "available {}, requested {}",
                material.quantity, input.quantity
            )));
        }

        let row = sqlx::query_as::<_, TransferRow>(&format!(
            r#"
            INSERT INTO transfers (
                material_id, material_name, quantity, from_warehouse,
                to_warehouse, requested_by, reason, status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8)
            RETURNING {TRANSFER_COLUMNS}
            "#
        ))
        .bind(input.material_id)
        .bind(&material.name)
        .bind(input.quantity)
        .bind(&input.from_warehouse)
        .bind(&input.to_warehouse)
        .bind(requested_by)
        .bind(&reason)
        .bind(&notes)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            material = %material.name,
            quantity = input.quantity,
            from = %row.from_warehouse,
            to = %row.to_warehouse,
            "transfer requested"
        );
        row.into_transfer()
    }

    /// Get a transfer by id
    pub async fn get(&self, id: Uuid) -> AppResult<Transfer> {
        let row = sqlx::query_as::<_, TransferRow>(&format!(
            "SELECT {TRANSFER_COLUMNS} FROM transfers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transfer".to_string()))?;

        row.into_transfer()
    }

    /// List transfers, optionally filtered by status, newest first
    pub async fn list(&self, status: Option<TransferStatus>) -> AppResult<Vec<Transfer>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, TransferRow>(&format!(
                    "SELECT {TRANSFER_COLUMNS} FROM transfers WHERE status = $1 ORDER BY requested_at DESC"
                ))
                .bind(status.as_str())
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, TransferRow>(&format!(
                    "SELECT {TRANSFER_COLUMNS} FROM transfers ORDER BY requested_at DESC"
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        rows.into_iter().map(TransferRow::into_transfer).collect()
    }

    /// Advance a transfer to a new status, enforcing the workflow
    ///
    /// The current row is locked so concurrent updates serialize; the
    /// transition is checked against the state machine, and completion
    /// stamps `completed_at`.
    pub async fn set_status(
        &self,
        id: Uuid,
        next: TransferStatus,
        authorized_by: &str,
    ) -> AppResult<Transfer> {
        let mut tx = self.db.begin().await?;

        let current_raw = sqlx::query_scalar::<_, String>(
            "SELECT status FROM transfers WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Transfer".to_string()))?;

        let current = parse_status(&current_raw)?;
        if current.is_terminal() {
            return Err(AppError::InvalidStateTransition(format!(
                "{} is terminal",
                current.as_str()
            )));
        }
        if !current.can_transition_to(next) {
            return Err(AppError::InvalidStateTransition(format!(
                "{} -> {}",
                current.as_str(),
                next.as_str()
            )));
        }

        let row = sqlx::query_as::<_, TransferRow>(&format!(
            r#"
            UPDATE transfers SET
                status = $1,
                authorized_by = $2,
                completed_at = CASE WHEN $1 = 'completed' THEN NOW() ELSE completed_at END
            WHERE id = $3
            RETURNING {TRANSFER_COLUMNS}
            "#
        ))
        .bind(next.as_str())
        .bind(authorized_by)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(%id, from = %current.as_str(), to = %next.as_str(), "transfer status changed");
        row.into_transfer()
    }
}
