//! Authentication Extractors
//!
//! Axum extractor for the bearer-token convention: handlers take a
//! [`CurrentUser`] argument and receive the resolved identity snapshot,
//! with missing or malformed credentials rejected as unauthenticated.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};

use crate::error::AuthError;
use crate::models::UserSnapshot;
use crate::service::AuthService;

/// Shared auth service state
pub type AuthState = Arc<AuthService>;

/// Extract the token from a `Authorization: Bearer <token>` header
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// The authenticated identity behind the presented access token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserSnapshot);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Resolved once by the middleware when it is installed
        if let Some(snapshot) = parts.extensions.get::<UserSnapshot>() {
            return Ok(CurrentUser(snapshot.clone()));
        }

        let token = bearer_token(&parts.headers).ok_or(AuthError::InvalidCredentials)?;

        let auth = AuthState::from_ref(state);
        let snapshot = auth.current_user(token).await?;

        Ok(CurrentUser(snapshot))
    }
}
