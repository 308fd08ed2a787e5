//! Material catalog service: CRUD, search, barcode lookup and stock queries

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Material;
use shared::validation::{validate_material_code, validate_stock_bounds};

/// Material service
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// Database row for a material
#[derive(Debug, FromRow)]
pub(crate) struct MaterialRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub quantity: i64,
    pub unit: String,
    pub location: Option<String>,
    pub warehouse: Option<String>,
    pub unit_price: Option<Decimal>,
    pub provider_id: Option<Uuid>,
    pub min_stock: i64,
    pub max_stock: i64,
    pub active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MaterialRow> for Material {
    fn from(row: MaterialRow) -> Self {
        Material {
            id: row.id,
            code: row.code,
            name: row.name,
            description: row.description,
            category: row.category,
            quantity: row.quantity,
            unit: row.unit,
            location: row.location,
            warehouse: row.warehouse,
            unit_price: row.unit_price,
            provider_id: row.provider_id,
            min_stock: row.min_stock,
            max_stock: row.max_stock,
            active: row.active,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const MATERIAL_COLUMNS: &str = "id, code, name, description, category, quantity, unit, location, \
     warehouse, unit_price, provider_id, min_stock, max_stock, active, notes, created_at, updated_at";

/// Input for creating a material
#[derive(Debug, Deserialize)]
pub struct CreateMaterialInput {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub warehouse: Option<String>,
    pub unit_price: Option<Decimal>,
    pub provider_id: Option<Uuid>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub notes: Option<String>,
}

/// Input for updating a material; omitted fields keep their current value
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub warehouse: Option<String>,
    pub unit_price: Option<Decimal>,
    pub provider_id: Option<Uuid>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub active: Option<bool>,
    pub notes: Option<String>,
}

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a material
    pub async fn create(&self, input: CreateMaterialInput) -> AppResult<Material> {
        validate_material_code(&input.code).map_err(|msg| AppError::Validation {
            field: "code".to_string(),
            message: msg.to_string(),
            message_es: "Código de material inválido".to_string(),
        })?;

        let quantity = input.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Initial quantity cannot be negative".to_string(),
                message_es: "La cantidad inicial no puede ser negativa".to_string(),
            });
        }

        let min_stock = input.min_stock.unwrap_or(10);
        let max_stock = input.max_stock.unwrap_or(1000);
        validate_stock_bounds(min_stock, max_stock).map_err(|msg| AppError::Validation {
            field: "min_stock/max_stock".to_string(),
            message: msg.to_string(),
            message_es: "Límites de stock inválidos".to_string(),
        })?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM materials WHERE code = $1)")
                .bind(&input.code)
                .fetch_one(&self.db)
                .await?;
        if exists {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }

        let unit = input.unit.unwrap_or_else(|| "unidades".to_string());

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            INSERT INTO materials (
                code, name, description, category, quantity, unit, location,
                warehouse, unit_price, provider_id, min_stock, max_stock, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {MATERIAL_COLUMNS}
            "#
        ))
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(quantity)
        .bind(&unit)
        .bind(&input.location)
        .bind(&input.warehouse)
        .bind(input.unit_price)
        .bind(input.provider_id)
        .bind(min_stock)
        .bind(max_stock)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(code = %row.code, "material created");
        Ok(row.into())
    }

    /// Look up a material by id; absent materials are not an error
    pub async fn find(&self, id: Uuid) -> AppResult<Option<Material>> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Material::from))
    }

    /// Get a material by id
    pub async fn get(&self, id: Uuid) -> AppResult<Material> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Material".to_string()))
    }

    /// Look up a material by scanned barcode/QR payload, falling back to id
    /// when the payload parses as a UUID
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Material>> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.db)
        .await?;

        if let Some(row) = row {
            return Ok(Some(row.into()));
        }

        match Uuid::parse_str(code) {
            Ok(id) => self.find(id).await,
            Err(_) => Ok(None),
        }
    }

    /// Search materials by name prefix (case-insensitive)
    pub async fn search(&self, query: &str) -> AppResult<Vec<Material>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            SELECT {MATERIAL_COLUMNS} FROM materials
            WHERE name ILIKE $1 || '%'
            ORDER BY name
            "#
        ))
        .bind(query)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Material::from).collect())
    }

    /// List materials, optionally filtered by category
    pub async fn list(&self, category: Option<&str>) -> AppResult<Vec<Material>> {
        let rows = match category {
            Some(category) => {
                sqlx::query_as::<_, MaterialRow>(&format!(
                    "SELECT {MATERIAL_COLUMNS} FROM materials WHERE category = $1 ORDER BY name"
                ))
                .bind(category)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, MaterialRow>(&format!(
                    "SELECT {MATERIAL_COLUMNS} FROM materials ORDER BY name"
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows.into_iter().map(Material::from).collect())
    }

    /// List active materials
    pub async fn list_active(&self) -> AppResult<Vec<Material>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE active = true ORDER BY name"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Material::from).collect())
    }

    /// List active materials at or below their safety stock level
    pub async fn list_low_stock(&self) -> AppResult<Vec<Material>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            SELECT {MATERIAL_COLUMNS} FROM materials
            WHERE active = true AND quantity <= min_stock
            ORDER BY quantity
            "#
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Material::from).collect())
    }

    /// Total units on hand across all active materials
    pub async fn total_stock(&self) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(quantity), 0) FROM materials WHERE active = true",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(total)
    }

    /// Update a material; stock quantity changes only through movements
    pub async fn update(&self, id: Uuid, input: UpdateMaterialInput) -> AppResult<Material> {
        let existing = self.get(id).await?;

        let min_stock = input.min_stock.unwrap_or(existing.min_stock);
        let max_stock = input.max_stock.unwrap_or(existing.max_stock);
        validate_stock_bounds(min_stock, max_stock).map_err(|msg| AppError::Validation {
            field: "min_stock/max_stock".to_string(),
            message: msg.to_string(),
            message_es: "Límites de stock inválidos".to_string(),
        })?;

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            UPDATE materials SET
                name = $1, description = $2, category = $3, unit = $4,
                location = $5, warehouse = $6, unit_price = $7, provider_id = $8,
                min_stock = $9, max_stock = $10, active = $11, notes = $12,
                updated_at = NOW()
            WHERE id = $13
            RETURNING {MATERIAL_COLUMNS}
            "#
        ))
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.description.or(existing.description))
        .bind(input.category.unwrap_or(existing.category))
        .bind(input.unit.unwrap_or(existing.unit))
        .bind(input.location.or(existing.location))
        .bind(input.warehouse.or(existing.warehouse))
        .bind(input.unit_price.or(existing.unit_price))
        .bind(input.provider_id.or(existing.provider_id))
        .bind(min_stock)
        .bind(max_stock)
        .bind(input.active.unwrap_or(existing.active))
        .bind(input.notes.or(existing.notes))
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a material and its movement history
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        tracing::info!(%id, "material deleted");
        Ok(())
    }
}
