//! Identity Cache
//!
//! A time-boundedly-fresh store mapping an email address to a cached
//! identity snapshot, used to spare the primary datastore a lookup on
//! every authenticated request. Backends implement [`IdentityCache`];
//! the session manager treats any backend fault as a miss.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CacheError;
use crate::models::UserSnapshot;

/// Cache backend for identity snapshots
///
/// Implementations must be safe for concurrent `get`/`put` from many
/// request tasks. Last-writer-wins on `put` is acceptable: entries are
/// idempotent snapshots of the same user keyed by the same email.
#[async_trait]
pub trait IdentityCache: Send + Sync {
    /// Look up a snapshot by email
    ///
    /// A missing or expired entry is `Ok(None)`, never an error. Errors
    /// are reserved for backend faults.
    async fn get(&self, email: &str) -> Result<Option<UserSnapshot>, CacheError>;

    /// Store a snapshot with an absolute expiry of `ttl` from now
    ///
    /// Overwrites any existing entry for the same email.
    async fn put(
        &self,
        email: &str,
        snapshot: &UserSnapshot,
        ttl: Duration,
    ) -> Result<(), CacheError>;
}

struct CacheSlot {
    snapshot: UserSnapshot,
    expires_at: Instant,
}

/// In-memory identity cache with per-entry TTL
///
/// Expired entries are dropped lazily when read. Suitable for a single
/// process; a shared backend can implement [`IdentityCache`] instead
/// without touching the session manager.
#[derive(Default)]
pub struct InMemoryIdentityCache {
    entries: RwLock<HashMap<String, CacheSlot>>,
}

impl InMemoryIdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries, counting not-yet-collected expired slots
    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl IdentityCache for InMemoryIdentityCache {
    async fn get(&self, email: &str) -> Result<Option<UserSnapshot>, CacheError> {
        let mut entries = self.entries.write().await;

        match entries.get(email) {
            Some(slot) if slot.expires_at > Instant::now() => Ok(Some(slot.snapshot.clone())),
            Some(_) => {
                entries.remove(email);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        email: &str,
        snapshot: &UserSnapshot,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let slot = CacheSlot {
            snapshot: snapshot.clone(),
            expires_at: Instant::now() + ttl,
        };

        self.entries.write().await.insert(email.to_string(), slot);
        Ok(())
    }
}
