//! Authentication Error Types
//!
//! Centralized error handling for the authentication subsystem. Token
//! failures in the access/refresh flows all map to an unauthenticated
//! response, while email-verification token failures map to an
//! unprocessable response so callers can tell a broken link apart from
//! a stale session.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Authentication errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token signature is invalid")]
    TokenSignatureInvalid,

    #[error("Invalid scope for token")]
    TokenScopeMismatch,

    #[error("Malformed token")]
    TokenMalformed,

    #[error("Invalid token for email verification")]
    EmailTokenInvalid,

    #[error("User not found")]
    UserNotFound,

    #[error("Cache unavailable: {0}")]
    Cache(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error")]
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AuthError::TokenExpired
            | AuthError::TokenSignatureInvalid
            | AuthError::TokenScopeMismatch
            | AuthError::TokenMalformed => {
                (StatusCode::UNAUTHORIZED, "invalid_token", self.to_string())
            }
            AuthError::EmailTokenInvalid => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_verification_token",
                self.to_string(),
            ),
            AuthError::UserNotFound => {
                (StatusCode::NOT_FOUND, "user_not_found", self.to_string())
            }
            AuthError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AuthError::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                msg.clone(),
            ),
            AuthError::Cache(_) | AuthError::Database(_) | AuthError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        let mut response = (
            status,
            Json(serde_json::json!({
                "error": error_code,
                "message": message
            })),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AuthError::Database(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        tracing::error!("Password hashing error: {:?}", err);
        AuthError::Internal
    }
}

/// Error from an identity-cache backend.
///
/// Never surfaced to callers of the session manager: a failing cache
/// degrades to a repository lookup, it does not fail authentication.
#[derive(Debug, Clone, thiserror::Error)]
#[error("cache backend error: {0}")]
pub struct CacheError(pub String);

impl From<CacheError> for AuthError {
    fn from(err: CacheError) -> Self {
        AuthError::Cache(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_map_to_unauthorized() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::TokenExpired,
            AuthError::TokenSignatureInvalid,
            AuthError::TokenScopeMismatch,
            AuthError::TokenMalformed,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
                "Bearer"
            );
        }
    }

    #[test]
    fn email_token_error_maps_to_unprocessable() {
        let response = AuthError::EmailTokenInvalid.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AuthError::Database("connection refused to db-prod-1".into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
