//! User and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A platform user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Role-based access levels
///
/// Almacenero registers movements; JefeLogistica additionally manages
/// providers, projects, transfers and reports; Gerente has full access
/// including analytics and user management.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Almacenero,
    JefeLogistica,
    Gerente,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Almacenero => "almacenero",
            UserRole::JefeLogistica => "jefe_logistica",
            UserRole::Gerente => "gerente",
        }
    }

    pub fn parse(s: &str) -> Option<UserRole> {
        match s {
            "almacenero" => Some(UserRole::Almacenero),
            "jefe_logistica" => Some(UserRole::JefeLogistica),
            "gerente" => Some(UserRole::Gerente),
            _ => None,
        }
    }

    /// Everyone may register stock movements
    pub fn can_register_movements(&self) -> bool {
        true
    }

    /// Reports, providers, projects and transfers need logistics lead or above
    pub fn can_manage_logistics(&self) -> bool {
        matches!(self, UserRole::JefeLogistica | UserRole::Gerente)
    }

    /// Demand analytics and user management are manager-only
    pub fn can_access_analytics(&self) -> bool {
        matches!(self, UserRole::Gerente)
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, UserRole::Gerente)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permission_matrix() {
        assert!(UserRole::Almacenero.can_register_movements());
        assert!(!UserRole::Almacenero.can_manage_logistics());
        assert!(!UserRole::Almacenero.can_access_analytics());

        assert!(UserRole::JefeLogistica.can_manage_logistics());
        assert!(!UserRole::JefeLogistica.can_access_analytics());
        assert!(!UserRole::JefeLogistica.can_manage_users());

        assert!(UserRole::Gerente.can_manage_logistics());
        assert!(UserRole::Gerente.can_access_analytics());
        assert!(UserRole::Gerente.can_manage_users());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::Almacenero,
            UserRole::JefeLogistica,
            UserRole::Gerente,
        ] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("capataz"), None);
    }
}
