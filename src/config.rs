//! Authentication Configuration
//!
//! All configuration values are loaded from environment variables and
//! passed into the session manager's constructor. No process-global
//! state: tests and embedding applications build the struct directly.

use crate::error::AuthError;
use std::env;

/// Signing algorithms accepted for the shared-secret codec
const SUPPORTED_ALGORITHMS: &[&str] = &["HS256", "HS384", "HS512"];

/// Authentication configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for signing tokens (from JWT_SECRET env var)
    pub jwt_secret: String,

    /// Signing algorithm identifier (from JWT_ALGORITHM env var)
    pub jwt_algorithm: String,

    /// Access token lifetime in seconds (from ACCESS_TOKEN_TTL env var)
    pub access_token_ttl: i64,

    /// Refresh token lifetime in seconds (from REFRESH_TOKEN_TTL env var)
    pub refresh_token_ttl: i64,

    /// Email-verification token lifetime in seconds (from EMAIL_TOKEN_TTL env var)
    pub email_token_ttl: i64,

    /// Cached identity snapshot lifetime in seconds (from USER_CACHE_TTL env var)
    pub user_cache_ttl: u64,
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// # Panics
    /// Panics if the JWT_SECRET environment variable is not set
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET")
                .expect("JWT_SECRET environment variable must be set"),

            jwt_algorithm: env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),

            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900), // 15 minutes default

            refresh_token_ttl: env::var("REFRESH_TOKEN_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(604_800), // 7 days default

            email_token_ttl: env::var("EMAIL_TOKEN_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(604_800), // 7 days default

            user_cache_ttl: env::var("USER_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.jwt_secret.len() < 32 {
            return Err(AuthError::Config(
                "JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }

        if !SUPPORTED_ALGORITHMS.contains(&self.jwt_algorithm.as_str()) {
            return Err(AuthError::Config(format!(
                "JWT_ALGORITHM must be one of {}",
                SUPPORTED_ALGORITHMS.join(", ")
            )));
        }

        if self.access_token_ttl <= 0 {
            return Err(AuthError::Config(
                "ACCESS_TOKEN_TTL must be positive".to_string(),
            ));
        }

        if self.refresh_token_ttl <= self.access_token_ttl {
            return Err(AuthError::Config(
                "REFRESH_TOKEN_TTL must be greater than ACCESS_TOKEN_TTL".to_string(),
            ));
        }

        if self.email_token_ttl <= 0 {
            return Err(AuthError::Config(
                "EMAIL_TOKEN_TTL must be positive".to_string(),
            ));
        }

        if self.user_cache_ttl == 0 {
            return Err(AuthError::Config(
                "USER_CACHE_TTL must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
