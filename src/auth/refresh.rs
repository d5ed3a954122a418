// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cache of refreshed session tokens.
//!
//! When several in-flight requests hit an expired session at once, only the
//! first one calls the backend's refresh endpoint. The lock is held across
//! that call, so the others wait and then read the cached replacement.
//!
//! Entries are removed by a spawned task once the retention window has
//! passed, whether or not they were used in the meantime.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::AuthError;
use crate::backend::RemoteBackend;

/// Default retention of a refreshed token (5 minutes).
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(300);

/// Maps expired opaque tokens to their replacements.
pub struct RefreshCache<B> {
    backend: Arc<B>,
    retention: Duration,
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl<B: RemoteBackend> RefreshCache<B> {
    /// Create an empty cache backed by `backend`.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            retention: DEFAULT_RETENTION,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create with custom retention window.
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Retention window of cached entries.
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Return the replacement for `old`, refreshing it remotely if needed.
    pub async fn refresh(&self, old: &str) -> Result<String, AuthError> {
        let mut entries = self.entries.lock().await;
        if let Some(new) = entries.get(old) {
            debug!("Using cached refreshed token");
            return Ok(new.clone());
        }

        let new = self.backend.refresh_token(old).await?;
        entries.insert(old.to_string(), new.clone());
        drop(entries);

        info!(retention_secs = self.retention.as_secs(), "Refreshed session token");
        self.schedule_eviction(old.to_string());
        Ok(new)
    }

    /// Look up a cached replacement without refreshing.
    pub async fn cached(&self, old: &str) -> Option<String> {
        self.entries.lock().await.get(old).cloned()
    }

    fn schedule_eviction(&self, old: String) {
        let entries = Arc::clone(&self.entries);
        let retention = self.retention;
        tokio::spawn(async move {
            tokio::time::sleep(retention).await;
            entries.lock().await.remove(&old);
            debug!("Evicted refreshed token");
        });
    }
}
