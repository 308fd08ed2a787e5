//! Provider (supplier) catalog service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Provider;
use shared::validation::{validate_email, validate_phone, validate_tax_id};

/// Provider service
#[derive(Clone)]
pub struct ProviderService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
pub(crate) struct ProviderRow {
    pub id: Uuid,
    pub name: String,
    pub legal_name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ProviderRow> for Provider {
    fn from(row: ProviderRow) -> Self {
        Provider {
            id: row.id,
            name: row.name,
            legal_name: row.legal_name,
            tax_id: row.tax_id,
            phone: row.phone,
            email: row.email,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

const PROVIDER_COLUMNS: &str = "id, name, legal_name, tax_id, phone, email, active, created_at";

/// Input for creating a provider
#[derive(Debug, Deserialize)]
pub struct CreateProviderInput {
    pub name: String,
    pub legal_name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Input for updating a provider; omitted fields keep their current value
#[derive(Debug, Deserialize)]
pub struct UpdateProviderInput {
    pub name: Option<String>,
    pub legal_name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
}

fn validate_contact(
    tax_id: Option<&str>,
    phone: Option<&str>,
    email: Option<&str>,
) -> AppResult<()> {
    if let Some(tax_id) = tax_id {
        validate_tax_id(tax_id).map_err(|msg| AppError::Validation {
            field: "tax_id".to_string(),
            message: msg.to_string(),
            message_es: "RUC inválido".to_string(),
        })?;
    }
    if let Some(phone) = phone {
        validate_phone(phone).map_err(|msg| AppError::Validation {
            field: "phone".to_string(),
            message: msg.to_string(),
            message_es: "Teléfono inválido".to_string(),
        })?;
    }
    if let Some(email) = email {
        validate_email(email).map_err(|msg| AppError::Validation {
            field: "email".to_string(),
            message: msg.to_string(),
            message_es: "Formato de correo inválido".to_string(),
        })?;
    }
    Ok(())
}

impl ProviderService {
    /// Create a new ProviderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a provider
    pub async fn create(&self, input: CreateProviderInput) -> AppResult<Provider> {
        validate_contact(
            input.tax_id.as_deref(),
            input.phone.as_deref(),
            input.email.as_deref(),
        )?;

        if let Some(tax_id) = &input.tax_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM providers WHERE tax_id = $1)",
            )
            .bind(tax_id)
            .fetch_one(&self.db)
            .await?;
            if exists {
                return Err(AppError::DuplicateEntry("tax_id".to_string()));
            }
        }

        let row = sqlx::query_as::<_, ProviderRow>(&format!(
            r#"
            INSERT INTO providers (name, legal_name, tax_id, phone, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROVIDER_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.legal_name)
        .bind(&input.tax_id)
        .bind(&input.phone)
        .bind(&input.email)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(name = %row.name, "provider created");
        Ok(row.into())
    }

    /// Get a provider by id
    pub async fn get(&self, id: Uuid) -> AppResult<Provider> {
        let row = sqlx::query_as::<_, ProviderRow>(&format!(
            "SELECT {PROVIDER_COLUMNS} FROM providers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Provider".to_string()))?;

        Ok(row.into())
    }

    /// List providers, active first
    pub async fn list(&self) -> AppResult<Vec<Provider>> {
        let rows = sqlx::query_as::<_, ProviderRow>(&format!(
            "SELECT {PROVIDER_COLUMNS} FROM providers ORDER BY active DESC, name"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Provider::from).collect())
    }

    /// Search providers by name prefix (case-insensitive)
    pub async fn search(&self, query: &str) -> AppResult<Vec<Provider>> {
        let rows = sqlx::query_as::<_, ProviderRow>(&format!(
            r#"
            SELECT {PROVIDER_COLUMNS} FROM providers
            WHERE name ILIKE $1 || '%' OR legal_name ILIKE $1 || '%'
            ORDER BY name
            "#
        ))
        .bind(query)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Provider::from).collect())
    }

    /// Update a provider
    pub async fn update(&self, id: Uuid, input: UpdateProviderInput) -> AppResult<Provider> {
        validate_contact(
            input.tax_id.as_deref(),
            input.phone.as_deref(),
            input.email.as_deref(),
        )?;

        let existing = self.get(id).await?;

        let row = sqlx::query_as::<_, ProviderRow>(&format!(
            r#"
            UPDATE providers SET
                name = $1, legal_name = $2, tax_id = $3, phone = $4,
                email = $5, active = $6
            WHERE id = $7
            RETURNING {PROVIDER_COLUMNS}
            "#
        ))
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.legal_name.or(existing.legal_name))
        .bind(input.tax_id.or(existing.tax_id))
        .bind(input.phone.or(existing.phone))
        .bind(input.email.or(existing.email))
        .bind(input.active.unwrap_or(existing.active))
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Deactivate a provider; materials keep their reference
    pub async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE providers SET active = false WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Provider".to_string()));
        }
        Ok(())
    }
}
