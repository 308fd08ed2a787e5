//! Authentication middleware
//!
//! JWT authentication and role-based access control middleware. The
//! authenticated user travels with the request as an extension; there is no
//! global session state.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::UserRole;

use crate::error::{AppError, AppResult, ErrorResponse};
use crate::AppState;

/// Authenticated user information extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: uuid::Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    /// Reports, providers, projects and transfers require logistics lead
    /// or above
    pub fn require_logistics(&self) -> AppResult<()> {
        if self.role.can_manage_logistics() {
            Ok(())
        } else {
            Err(AppError::InsufficientPermissions)
        }
    }

    /// Demand analytics and user management require the manager role
    pub fn require_manager(&self) -> AppResult<()> {
        if self.role.can_access_analytics() {
            Ok(())
        } else {
            Err(AppError::InsufficientPermissions)
        }
    }
}

/// Authentication middleware that validates JWT tokens
///
/// Verifies against the same configured secret the auth service signs
/// with, then attaches an `AuthUser` to the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let claims = match decode_jwt(token, &state.config.jwt.secret) {
        Ok(claims) => claims,
        Err(err) => {
            return err.into_response();
        }
    };

    let user_id = match uuid::Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => return unauthorized_response("Invalid user ID in token"),
    };

    let role = match UserRole::parse(&claims.role) {
        Some(role) => role,
        None => return unauthorized_response("Invalid role in token"),
    };

    // Create AuthUser and insert into request extensions
    let auth_user = AuthUser {
        user_id,
        email: claims.email,
        role,
    };

    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

/// JWT claims structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: String,
    exp: i64,
    iat: i64,
}

/// Decode and validate JWT token
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message_en: message.to_string(),
            message_es: "No autorizado".to_string(),
            field: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: crate::error::ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message_en: "Authentication required".to_string(),
                        message_es: "Se requiere iniciar sesión".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn auth_user(role: UserRole) -> AuthUser {
        AuthUser {
            user_id: uuid::Uuid::new_v4(),
            email: "almacen@marvic.pe".to_string(),
            role,
        }
    }

    fn token(secret: &str, expires_in: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "almacen@marvic.pe".to_string(),
            role: "gerente".to_string(),
            exp: now + expires_in,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_logistics_gate_rejects_warehouse_clerk() {
        assert!(matches!(
            auth_user(UserRole::Almacenero).require_logistics(),
            Err(AppError::InsufficientPermissions)
        ));
        assert!(auth_user(UserRole::JefeLogistica).require_logistics().is_ok());
        assert!(auth_user(UserRole::Gerente).require_logistics().is_ok());
    }

    #[test]
    fn test_manager_gate_rejects_non_managers() {
        assert!(matches!(
            auth_user(UserRole::Almacenero).require_manager(),
            Err(AppError::InsufficientPermissions)
        ));
        assert!(matches!(
            auth_user(UserRole::JefeLogistica).require_manager(),
            Err(AppError::InsufficientPermissions)
        ));
        assert!(auth_user(UserRole::Gerente).require_manager().is_ok());
    }

    #[test]
    fn test_decode_round_trips_with_the_signing_secret() {
        let secret = "configured-signing-secret";
        let claims = decode_jwt(&token(secret, 3600), secret).unwrap();
        assert_eq!(claims.role, "gerente");
    }

    #[test]
    fn test_decode_rejects_a_different_secret() {
        let signed = token("configured-signing-secret", 3600);
        assert!(matches!(
            decode_jwt(&signed, "some-other-secret"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_decode_reports_expiry_distinctly() {
        let secret = "configured-signing-secret";
        let stale = token(secret, -3600);
        assert!(matches!(
            decode_jwt(&stale, secret),
            Err(AppError::TokenExpired)
        ));
    }
}
