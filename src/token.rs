//! Token Codec
//!
//! Encoding and decoding of the signed, expiring claim sets shared by
//! access, refresh and email-verification tokens. The three kinds share
//! one codec and one secret; the scope claim checked at decode time is
//! what keeps them from being interchangeable.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Declared purpose of a token, checked on decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenScope {
    #[serde(rename = "access_token")]
    Access,
    #[serde(rename = "refresh_token")]
    Refresh,
    #[serde(rename = "email_token")]
    EmailVerification,
}

impl TokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::Access => "access_token",
            TokenScope::Refresh => "refresh_token",
            TokenScope::EmailVerification => "email_token",
        }
    }
}

impl std::fmt::Display for TokenScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Signed claim set carried by every token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's email address
    pub sub: String,
    /// Issued-at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Declared purpose
    pub scope: TokenScope,
    /// Token id
    pub jti: Uuid,
}

/// Codec for signed, expiring claim sets
///
/// Built once from configuration; read-only afterwards, safe to share
/// across request tasks.
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys are deliberately omitted: they wrap the signing secret.
        f.debug_struct("TokenCodec")
            .field("header", &self.header)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec from the shared secret and algorithm identifier
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let algorithm: Algorithm = config.jwt_algorithm.parse().map_err(|_| {
            AuthError::Config(format!(
                "unsupported signing algorithm: {}",
                config.jwt_algorithm
            ))
        })?;

        // Expiry is enforced exactly; a token is invalid the moment
        // its exp elapses.
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;

        Ok(Self {
            header: Header::new(algorithm),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }

    /// Encode a token for `subject` expiring `ttl` from now
    pub fn encode(
        &self,
        subject: &str,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            scope,
            jti: Uuid::new_v4(),
        };

        encode(&self.header, &claims, &self.encoding_key).map_err(|err| {
            tracing::error!(scope = %scope, "Token encoding failed: {:?}", err);
            AuthError::Internal
        })
    }

    /// Decode a token, verifying signature, expiry and scope
    ///
    /// The three failure modes stay distinct so the session manager can
    /// surface expired, tampered and wrong-purpose tokens differently.
    pub fn decode(&self, token: &str, expected_scope: TokenScope) -> Result<TokenClaims, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |err| {
                tracing::debug!("Token validation failed: {:?}", err);
                match err.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    ErrorKind::InvalidSignature => AuthError::TokenSignatureInvalid,
                    _ => AuthError::TokenMalformed,
                }
            },
        )?;

        if data.claims.scope != expected_scope {
            tracing::debug!(
                presented = %data.claims.scope,
                expected = %expected_scope,
                "Token scope mismatch"
            );
            return Err(AuthError::TokenScopeMismatch);
        }

        Ok(data.claims)
    }
}
