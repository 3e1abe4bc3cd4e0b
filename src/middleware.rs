//! Authentication Middleware
//!
//! Bearer-token layers for the routing layer to install with
//! `axum::middleware::from_fn_with_state`. Resolution goes through the
//! session manager, so the identity cache is consulted exactly as for
//! any other resolution.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AuthError;
use crate::extractors::{bearer_token, AuthState};

/// Require an authenticated user
///
/// Resolves the access token and stores the identity snapshot in the
/// request extensions for handlers and the [`CurrentUser`] extractor.
///
/// [`CurrentUser`]: crate::extractors::CurrentUser
pub async fn require_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::InvalidCredentials)?;
    let snapshot = auth.current_user(token).await?;

    req.extensions_mut().insert(snapshot);

    Ok(next.run(req).await)
}

/// Optional authentication
///
/// Attempts resolution but lets the request through either way; the
/// snapshot is stored only when the token resolves.
pub async fn optional_auth(State(auth): State<AuthState>, mut req: Request, next: Next) -> Response {
    let token = bearer_token(req.headers()).map(str::to_owned);

    if let Some(token) = token {
        if let Ok(snapshot) = auth.current_user(&token).await {
            req.extensions_mut().insert(snapshot);
        }
    }

    next.run(req).await
}
