//! Common test utilities for the integration suites

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use contactly_auth::{
    hash_password, AuthConfig, AuthError, AuthService, CacheError, IdentityCache,
    InMemoryIdentityCache, User, UserRepository, UserSnapshot,
};

/// Configuration used across the integration suites
pub fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret-0123456789ab".to_string(),
        jwt_algorithm: "HS256".to_string(),
        access_token_ttl: 900,
        refresh_token_ttl: 604_800,
        email_token_ttl: 604_800,
        user_cache_ttl: 900,
    }
}

/// A user named bob with password "secret"
pub fn bob() -> User {
    User {
        id: 1,
        username: "bob".to_string(),
        email: "bob@example.com".to_string(),
        password_hash: hash_password("secret").unwrap(),
        avatar: Some("https://cdn.contactly.dev/avatars/1.png".to_string()),
        confirmed: true,
        created_at: Utc::now(),
    }
}

/// In-memory repository stub that counts lookups
pub struct CountingRepository {
    users: HashMap<String, User>,
    calls: AtomicUsize,
}

impl CountingRepository {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.email.clone(), user))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for CountingRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.get(email).cloned())
    }
}

/// Cache stub that fails every operation, simulating a backend outage
pub struct UnavailableCache;

#[async_trait]
impl IdentityCache for UnavailableCache {
    async fn get(&self, _email: &str) -> Result<Option<UserSnapshot>, CacheError> {
        Err(CacheError("backend unavailable".into()))
    }

    async fn put(
        &self,
        _email: &str,
        _snapshot: &UserSnapshot,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Err(CacheError("backend unavailable".into()))
    }
}

/// Service over a counting repository holding only bob
pub fn create_test_service() -> (Arc<AuthService>, Arc<CountingRepository>) {
    let repository = Arc::new(CountingRepository::with_users([bob()]));
    let service = AuthService::new(
        repository.clone(),
        Arc::new(InMemoryIdentityCache::new()),
        test_config(),
    )
    .expect("valid test config");

    (Arc::new(service), repository)
}
