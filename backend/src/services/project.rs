//! Construction project service

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Project, ProjectStatus};

/// Project service
#[derive(Clone)]
pub struct ProjectService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub manager: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRow {
    fn into_project(self) -> AppResult<Project> {
        let status = match self.status.as_str() {
            "planning" => ProjectStatus::Planning,
            "active" => ProjectStatus::Active,
            "paused" => ProjectStatus::Paused,
            "completed" => ProjectStatus::Completed,
            other => {
                return Err(AppError::Internal(format!(
                    "Unknown project status '{}' in database",
                    other
                )))
            }
        };
        Ok(Project {
            id: self.id,
            name: self.name,
            location: self.location,
            manager: self.manager,
            status,
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PROJECT_COLUMNS: &str =
    "id, name, location, manager, status, start_date, end_date, notes, created_at, updated_at";

/// Input for creating a project
#[derive(Debug, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub location: Option<String>,
    pub manager: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Input for updating a project; omitted fields keep their current value
#[derive(Debug, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub manager: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

fn validate_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(AppError::Validation {
                field: "end_date".to_string(),
                message: "End date cannot be before start date".to_string(),
                message_es: "La fecha de fin no puede ser anterior al inicio".to_string(),
            });
        }
    }
    Ok(())
}

impl ProjectService {
    /// Create a new ProjectService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a project in planning status
    pub async fn create(&self, input: CreateProjectInput) -> AppResult<Project> {
        validate_dates(input.start_date, input.end_date)?;

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (name, location, manager, status, start_date, end_date, notes)
            VALUES ($1, $2, $3, 'planning', $4, $5, $6)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.manager)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(name = %row.name, "project created");
        row.into_project()
    }

    /// Get a project by id
    pub async fn get(&self, id: Uuid) -> AppResult<Project> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        row.into_project()
    }

    /// List projects, optionally filtered by status
    pub async fn list(&self, status: Option<ProjectStatus>) -> AppResult<Vec<Project>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, ProjectRow>(&format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects WHERE status = $1 ORDER BY created_at DESC"
                ))
                .bind(status.as_str())
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProjectRow>(&format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        rows.into_iter().map(ProjectRow::into_project).collect()
    }

    /// Update a project
    pub async fn update(&self, id: Uuid, input: UpdateProjectInput) -> AppResult<Project> {
        let existing = self.get(id).await?;

        let start_date = input.start_date.or(existing.start_date);
        let end_date = input.end_date.or(existing.end_date);
        validate_dates(start_date, end_date)?;

        let status = input.status.unwrap_or(existing.status);

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            UPDATE projects SET
                name = $1, location = $2, manager = $3, status = $4,
                start_date = $5, end_date = $6, notes = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.location.or(existing.location))
        .bind(input.manager.or(existing.manager))
        .bind(status.as_str())
        .bind(start_date)
        .bind(end_date)
        .bind(input.notes.or(existing.notes))
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        row.into_project()
    }

    /// Delete a project
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        tracing::info!(%id, "project deleted");
        Ok(())
    }
}
