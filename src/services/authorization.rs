use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::user::Role;

/// Answers "does user X exist with role R" before any write that depends on it.
#[derive(Clone)]
pub struct AuthorizationService {
    pool: PgPool,
}

impl AuthorizationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn role_of(&self, user_id: i64) -> Result<Option<Role>> {
        let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role.and_then(|r| r.parse().ok()))
    }

    /// Fails with `Forbidden` when the user is missing or has another role.
    pub async fn require_role(&self, user_id: i64, expected: Role, action: &str) -> Result<()> {
        let actual = self.role_of(user_id).await?;
        check_role(user_id, actual, expected, action)
    }
}

fn check_role(user_id: i64, actual: Option<Role>, expected: Role, action: &str) -> Result<()> {
    match actual {
        Some(role) if role == expected => Ok(()),
        Some(role) => {
            tracing::warn!(user_id, %role, %expected, action, "Role check failed");
            Err(Error::Forbidden(format!(
                "Solo los usuarios con rol de {} pueden {}",
                expected, action
            )))
        }
        None => {
            tracing::warn!(user_id, %expected, action, "Role check failed: user does not exist");
            Err(Error::Forbidden(format!(
                "El usuario {} no existe; solo los usuarios con rol de {} pueden {}",
                user_id, expected, action
            )))
        }
    }
}
