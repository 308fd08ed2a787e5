//! Authentication service for user registration, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use shared::models::{User, UserRole};
use shared::validation::{validate_email, validate_password};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Input for registering a new user
#[derive(Debug, Deserialize)]
pub struct RegisterUserInput {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
}

/// Input for logging in
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Response after a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    #[serde(flatten)]
    pub tokens: AuthTokens,
}

/// User row from database
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    role: String,
    password_hash: String,
    active: bool,
    created_at: chrono::DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AppResult<User> {
        let role = UserRole::parse(&self.role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role '{}' in database", self.role)))?;
        Ok(User {
            id: self.id,
            email: self.email,
            name: self.name,
            role,
            active: self.active,
            created_at: self.created_at,
        })
    }
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Register a new user (manager-only operation, enforced by the handler)
    pub async fn register(&self, input: RegisterUserInput) -> AppResult<User> {
        validate_email(&input.email).map_err(|msg| AppError::Validation {
            field: "email".to_string(),
            message: msg.to_string(),
            message_es: "Formato de correo inválido".to_string(),
        })?;
        validate_password(&input.password).map_err(|msg| AppError::Validation {
            field: "password".to_string(),
            message: msg.to_string(),
            message_es: "La contraseña no cumple los requisitos mínimos".to_string(),
        })?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = lower($1))",
        )
        .bind(&input.email)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, name, role, password_hash)
            VALUES (lower($1), $2, $3, $4)
            RETURNING id, email, name, role, password_hash, active, created_at
            "#,
        )
        .bind(&input.email)
        .bind(&input.name)
        .bind(input.role.as_str())
        .bind(&password_hash)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(email = %row.email, role = %row.role, "user registered");
        row.into_user()
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, role, password_hash, active, created_at
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(&input.email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !row.active {
            return Err(AppError::InvalidCredentials);
        }

        let valid = verify(&input.password, &row.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = row.into_user()?;
        let tokens = self.issue_tokens(&user)?;

        tracing::info!(email = %user.email, "user logged in");
        Ok(LoginResponse { user, tokens })
    }

    /// List all users (manager-only operation, enforced by the handler)
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, role, password_hash, active, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Change a user's role (manager-only operation, enforced by the handler)
    pub async fn set_role(&self, user_id: Uuid, role: UserRole) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET role = $1
            WHERE id = $2
            RETURNING id, email, name, role, password_hash, active, created_at
            "#,
        )
        .bind(role.as_str())
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        row.into_user()
    }

    /// Deactivate a user (manager-only operation, enforced by the handler)
    pub async fn deactivate(&self, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET active = false WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }
        Ok(())
    }

    fn issue_tokens(&self, user: &User) -> AppResult<AuthTokens> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            exp: now + self.access_token_expiry,
            iat: now,
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }
}
