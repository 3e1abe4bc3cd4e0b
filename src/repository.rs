//! User Lookup Collaborator
//!
//! The narrow interface this subsystem needs from the user store: a
//! single lookup by email, used at login and on identity-cache misses.
//! The schema and the rest of the user lifecycle belong to the
//! application's persistence layer.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AuthError;
use crate::models::User;

/// User lookup interface consumed by the session manager
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
}

/// Postgres-backed user repository
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, avatar, confirmed, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }
}
