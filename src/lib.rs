//! Contactly Authentication
//!
//! Authentication and session-caching subsystem for the Contactly
//! contact-management API, providing:
//! - Login with Argon2id credential verification
//! - JWT access and refresh tokens with scope checking at decode time
//! - Read-through identity caching in front of the user store
//! - Email-verification tokens
//! - Bearer-token extraction for the HTTP layer
//!
//! # Configuration
//!
//! Configuration is loaded from environment variables into an
//! [`AuthConfig`] passed to the service constructor:
//! - `JWT_SECRET` - Shared signing secret (required, min 32 chars)
//! - `JWT_ALGORITHM` - Signing algorithm (default: "HS256")
//! - `ACCESS_TOKEN_TTL` - Access token lifetime in seconds (default: 900)
//! - `REFRESH_TOKEN_TTL` - Refresh token lifetime in seconds (default: 604800)
//! - `EMAIL_TOKEN_TTL` - Verification token lifetime in seconds (default: 604800)
//! - `USER_CACHE_TTL` - Cached identity lifetime in seconds (default: 900)
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use contactly_auth::{AuthConfig, AuthService, InMemoryIdentityCache, PgUserRepository};
//!
//! let config = AuthConfig::from_env();
//! let auth = Arc::new(AuthService::new(
//!     Arc::new(PgUserRepository::new(db_pool)),
//!     Arc::new(InMemoryIdentityCache::new()),
//!     config,
//! )?);
//!
//! let pair = auth.login("bob@example.com", "secret").await?;
//! let user = auth.current_user(&pair.access_token).await?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use cache::{IdentityCache, InMemoryIdentityCache};
pub use config::AuthConfig;
pub use error::{AuthError, CacheError};
pub use extractors::{AuthState, CurrentUser};
pub use models::{LoginRequest, RefreshTokenRequest, TokenPair, User, UserSnapshot, VerifyEmailRequest};
pub use password::{hash_password, verify_password};
pub use repository::{PgUserRepository, UserRepository};
pub use service::AuthService;
pub use token::{TokenClaims, TokenCodec, TokenScope};
