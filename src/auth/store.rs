// Time-boxed token store keyed by service

use super::{CachedCredential, ServiceName};
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Which entries `TokenStore::invalidate` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidateScope {
    Service(ServiceName),
    All,
}

impl From<ServiceName> for InvalidateScope {
    fn from(service: ServiceName) -> Self {
        InvalidateScope::Service(service)
    }
}

/// Holds at most one bearer token per service.
///
/// Entries past their expiry are never returned and are dropped the first
/// time a lookup notices them. The lock is only held for map access, never
/// across a network call.
#[derive(Debug, Default)]
pub struct TokenStore {
    entries: RwLock<HashMap<ServiceName, CachedCredential>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token for `service` if it is still valid now.
    pub fn get(&self, service: ServiceName) -> Option<CachedCredential> {
        self.get_at(service, Utc::now())
    }

    /// Returns the cached token for `service` if it is valid at `now`.
    pub fn get_at(&self, service: ServiceName, now: DateTime<Utc>) -> Option<CachedCredential> {
        {
            let entries = self.entries.read();
            match entries.get(&service) {
                Some(entry) if entry.is_valid_at(now) => return Some(entry.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: evict, unless a concurrent login already replaced it
        let mut entries = self.entries.write();
        if entries
            .get(&service)
            .is_some_and(|entry| !entry.is_valid_at(now))
        {
            entries.remove(&service);
            debug!(service = %service, "Evicted expired token");
        }
        None
    }

    /// Stores `token` for `service`, replacing any previous entry.
    pub fn put(&self, service: ServiceName, token: String, ttl: Duration) -> CachedCredential {
        let entry = CachedCredential {
            service,
            token,
            expires_at: Utc::now() + ttl,
        };
        self.entries.write().insert(service, entry.clone());
        entry
    }

    /// Removes the selected entries and returns how many were present.
    pub fn invalidate(&self, scope: InvalidateScope) -> usize {
        let mut entries = self.entries.write();
        match scope {
            InvalidateScope::Service(service) => usize::from(entries.remove(&service).is_some()),
            InvalidateScope::All => {
                let count = entries.len();
                entries.clear();
                count
            }
        }
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
