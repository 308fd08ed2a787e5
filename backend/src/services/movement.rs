//! Stock movement service
//!
//! Registers signed stock movements against materials. The update is
//! transactional: the material row is locked, the non-negative-stock
//! invariant is checked, and only then is the immutable movement row
//! appended.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::StockMovement;
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};

/// Movement service
#[derive(Clone)]
pub struct MovementService {
    db: PgPool,
}

/// Database row for a stock movement
#[derive(Debug, FromRow)]
pub(crate) struct MovementRow {
    pub id: Uuid,
    pub material_id: Uuid,
    pub delta: i64,
    pub recorded_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
}

impl From<MovementRow> for StockMovement {
    fn from(row: MovementRow) -> Self {
        StockMovement {
            id: row.id,
            material_id: row.material_id,
            delta: row.delta,
            recorded_at: row.recorded_at,
            user_id: row.user_id,
        }
    }
}

/// Input for registering a stock movement
#[derive(Debug, Deserialize)]
pub struct RegisterMovementInput {
    pub material_id: Uuid,
    /// Signed quantity change (positive = in, negative = out)
    pub delta: i64,
}

impl MovementService {
    /// Create a new MovementService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a stock movement, enforcing that stock never goes negative
    ///
    /// A zero delta is accepted: it records an inventory check without
    /// changing stock, and the movement still counts toward analysis
    /// history.
    pub async fn register(
        &self,
        user_id: Uuid,
        input: RegisterMovementInput,
    ) -> AppResult<StockMovement> {
        let mut tx = self.db.begin().await?;

        let current = sqlx::query_scalar::<_, i64>(
            "SELECT quantity FROM materials WHERE id = $1 FOR UPDATE",
        )
        .bind(input.material_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        let new_quantity = current + input.delta;
        if new_quantity < 0 {
            return Err(AppError::InsufficientStock(format!(
                "available {}, requested {}",
                current, -input.delta
            )));
        }

        sqlx::query("UPDATE materials SET quantity = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_quantity)
            .bind(input.material_id)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, MovementRow>(
            r#"
            INSERT INTO stock_movements (material_id, delta, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, material_id, delta, recorded_at, user_id
            "#,
        )
        .bind(input.material_id)
        .bind(input.delta)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            material_id = %input.material_id,
            delta = input.delta,
            new_quantity,
            "movement registered"
        );
        Ok(row.into())
    }

    /// Movement history for a material over a trailing window, ascending
    /// by timestamp
    pub async fn history(&self, material_id: Uuid, days_back: i64) -> AppResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, material_id, delta, recorded_at, user_id
            FROM stock_movements
            WHERE material_id = $1
              AND recorded_at > NOW() - make_interval(days => $2::int)
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(material_id)
        .bind(days_back)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StockMovement::from).collect())
    }

    /// Most recent movements across all materials, newest first
    pub async fn recent(
        &self,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<StockMovement>> {
        let page = pagination.page.max(1);
        let per_page = pagination.per_page.clamp(1, 200);
        let offset = (page as i64 - 1) * per_page as i64;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stock_movements")
            .fetch_one(&self.db)
            .await?;

        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, material_id, delta, recorded_at, user_id
            FROM stock_movements
            ORDER BY recorded_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page as i64)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(StockMovement::from).collect(),
            pagination: PaginationMeta {
                page,
                per_page,
                total: total as u64,
            },
        })
    }

    /// Movement count over a trailing window
    pub async fn count_since(&self, days_back: i64) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stock_movements WHERE recorded_at > NOW() - make_interval(days => $1::int)",
        )
        .bind(days_back)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }
}
