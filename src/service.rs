//! Session Manager
//!
//! Orchestrates credential verification, token issuance and identity
//! resolution. Stateless between calls apart from the injected
//! collaborators; safe to share behind an `Arc` across request tasks.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::cache::IdentityCache;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::models::{TokenPair, UserSnapshot};
use crate::password::verify_password;
use crate::repository::UserRepository;
use crate::token::{TokenCodec, TokenScope};

/// Authentication service
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    cache: Arc<dyn IdentityCache>,
    codec: TokenCodec,
    config: AuthConfig,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Collaborators are trait objects without Debug; show config only.
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Create a new authentication service
    ///
    /// Fails if the configuration does not pass [`AuthConfig::validate`].
    pub fn new(
        repository: Arc<dyn UserRepository>,
        cache: Arc<dyn IdentityCache>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        config.validate()?;
        let codec = TokenCodec::new(&config)?;

        Ok(Self {
            repository,
            cache,
            codec,
            config,
        })
    }

    /// Get reference to config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    // ============================================
    // Login / Refresh
    // ============================================

    /// Verify credentials and issue an access/refresh token pair
    ///
    /// An unknown email and a wrong password are indistinguishable to
    /// the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.codec.encode(
            &user.email,
            Duration::seconds(self.config.access_token_ttl),
            TokenScope::Access,
        )?;
        let refresh_token = self.codec.encode(
            &user.email,
            Duration::seconds(self.config.refresh_token_ttl),
            TokenScope::Refresh,
        )?;

        tracing::info!(email = %user.email, "User logged in");

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Mint a new access token from a refresh token
    ///
    /// The presented refresh token is not rotated: it stays valid until
    /// its own expiry. Expired, tampered and wrong-scope tokens surface
    /// as distinct errors, all mapping to an unauthenticated response.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.codec.decode(refresh_token, TokenScope::Refresh)?;

        let access_token = self.codec.encode(
            &claims.sub,
            Duration::seconds(self.config.access_token_ttl),
            TokenScope::Access,
        )?;

        tracing::info!(email = %claims.sub, "Access token refreshed");

        Ok(access_token)
    }

    // ============================================
    // Identity Resolution
    // ============================================

    /// Resolve an access token to the identity it was issued for
    ///
    /// Consults the identity cache first; on a miss the user repository
    /// is queried and the cache repopulated. A cache fault degrades to
    /// a miss and never fails the request. Any decode failure, an empty
    /// subject or a vanished account collapse to `InvalidCredentials`.
    pub async fn current_user(&self, access_token: &str) -> Result<UserSnapshot, AuthError> {
        let claims = self
            .codec
            .decode(access_token, TokenScope::Access)
            .map_err(|err| {
                tracing::debug!("Access token rejected: {err}");
                AuthError::InvalidCredentials
            })?;

        if claims.sub.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        let email = claims.sub;

        match self.cache.get(&email).await {
            Ok(Some(snapshot)) => return Ok(snapshot),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(email = %email, "Identity cache read failed, falling back to repository: {err}");
            }
        }

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        let snapshot = UserSnapshot::from(&user);

        let ttl = StdDuration::from_secs(self.config.user_cache_ttl);
        if let Err(err) = self.cache.put(&email, &snapshot, ttl).await {
            tracing::warn!(email = %email, "Identity cache write failed: {err}");
        }

        Ok(snapshot)
    }

    // ============================================
    // Email Verification Tokens
    // ============================================

    /// Issue an email-verification token for `email`
    pub fn issue_email_token(&self, email: &str) -> Result<String, AuthError> {
        self.codec.encode(
            email,
            Duration::seconds(self.config.email_token_ttl),
            TokenScope::EmailVerification,
        )
    }

    /// Extract the email address from a verification token
    ///
    /// Any decode failure, including a token of another scope, surfaces
    /// as `EmailTokenInvalid` so the caller can report a broken link
    /// rather than an expired session.
    pub fn email_from_token(&self, token: &str) -> Result<String, AuthError> {
        let claims = self
            .codec
            .decode(token, TokenScope::EmailVerification)
            .map_err(|err| {
                tracing::debug!("Email verification token rejected: {err}");
                AuthError::EmailTokenInvalid
            })?;

        Ok(claims.sub)
    }
}
