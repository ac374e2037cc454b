//! User model, permissions and JWT claims

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Named capabilities granted to individual users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Set a book instance as returned, renew loans and see every borrowed copy
    CanMarkReturned,
}

impl Permission {
    pub fn codename(&self) -> &'static str {
        match self {
            Permission::CanMarkReturned => "can_mark_returned",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "catalog.{}", self.codename())
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches("catalog.") {
            "can_mark_returned" => Ok(Permission::CanMarkReturned),
            _ => Err(format!("Unknown permission: {}", s)),
        }
    }
}

/// User account from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i64,
    /// Permission codenames
    pub permissions: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.iter().any(|p| p == permission.codename())
    }

    pub fn require_permission(&self, permission: Permission) -> Result<(), AppError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Missing permission {}",
                permission
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(permissions: Vec<String>) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: "librarian".to_string(),
            user_id: 1,
            permissions,
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn test_token_round_trip_keeps_permissions() {
        let original = claims(vec!["can_mark_returned".to_string()]);
        let token = original.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();

        assert_eq!(parsed.user_id, 1);
        assert!(parsed.has_permission(Permission::CanMarkReturned));
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_require_permission() {
        assert!(claims(vec!["can_mark_returned".to_string()])
            .require_permission(Permission::CanMarkReturned)
            .is_ok());

        let err = claims(vec![])
            .require_permission(Permission::CanMarkReturned)
            .unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[test]
    fn test_permission_names() {
        assert_eq!(
            Permission::CanMarkReturned.to_string(),
            "catalog.can_mark_returned"
        );
        assert_eq!(
            "catalog.can_mark_returned".parse::<Permission>(),
            Ok(Permission::CanMarkReturned)
        );
        assert_eq!(
            "can_mark_returned".parse::<Permission>(),
            Ok(Permission::CanMarkReturned)
        );
        assert!("can_fly".parse::<Permission>().is_err());
    }
}
