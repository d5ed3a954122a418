// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! ## Behavior
//!
//! - The cache starts empty and is populated on the first key-id lookup
//! - There is no TTL: a lookup miss forces exactly one refresh, which is how
//!   key rotation on the backend is picked up
//! - A refresh replaces the whole set; a failed refresh keeps the old one
//!
//! ## Parsing
//!
//! Key-set parsing is best-effort. Entries that are not JSON objects are
//! dropped, and non-string fields inside an entry (`key_ops`, `x5c`) are
//! dropped while the rest of the entry is kept.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::error::AuthError;
use crate::backend::RemoteBackend;

/// One published signing key, as string fields (`kid`, `kty`, `n`, `e`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Jwk(HashMap<String, String>);

impl Jwk {
    /// Get a field of the key.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Key id, if the entry has one.
    pub fn kid(&self) -> Option<&str> {
        self.get("kid")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Jwk {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Parse a `{"keys": [...]}` document into key entries.
///
/// Fails only when the body is not JSON or has no `keys` array.
pub fn parse_key_set(body: &[u8]) -> Result<Vec<Jwk>, AuthError> {
    let document: Value = serde_json::from_slice(body)
        .map_err(|e| AuthError::Fetch(format!("key set is not valid JSON: {e}")))?;

    let entries = document
        .get("keys")
        .and_then(Value::as_array)
        .ok_or_else(|| AuthError::Fetch("key set has no \"keys\" array".to_string()))?;

    let keys: Vec<Jwk> = entries
        .iter()
        .filter_map(|entry| {
            let fields = entry.as_object()?;
            Some(
                fields
                    .iter()
                    .filter_map(|(name, value)| Some((name.as_str(), value.as_str()?)))
                    .collect::<Jwk>(),
            )
        })
        .collect();

    if keys.len() != entries.len() {
        warn!(
            dropped = entries.len() - keys.len(),
            "Dropped key set entries that are not JSON objects"
        );
    }

    Ok(keys)
}

/// Process-wide cache of the backend's published signing keys.
///
/// Cloning is cheap and clones share the same key set.
pub struct JwksCache<B> {
    backend: Arc<B>,
    keys: Arc<RwLock<Vec<Jwk>>>,
}

impl<B> Clone for JwksCache<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<B: RemoteBackend> JwksCache<B> {
    /// Create an empty cache backed by `backend`.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            keys: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fetch the key set and replace the cached one.
    ///
    /// On failure the previously cached keys are left untouched.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let keys = self.backend.fetch_keys().await?;
        info!(keys = keys.len(), "Refreshed JWKS");

        let mut cached = self.keys.write().await;
        *cached = keys;
        Ok(())
    }

    /// Resolve a key id to its key set entry.
    ///
    /// A miss triggers one refresh before giving up with
    /// [`AuthError::KeyNotFound`].
    pub async fn lookup(&self, kid: &str) -> Result<Jwk, AuthError> {
        if let Some(key) = self.find(kid).await {
            debug!(kid = %kid, "JWKS cache hit");
            return Ok(key);
        }

        debug!(kid = %kid, "JWKS cache miss, refreshing");
        self.refresh().await?;

        self.find(kid)
            .await
            .ok_or_else(|| AuthError::KeyNotFound(kid.to_string()))
    }

    /// Check if any key is currently cached.
    pub async fn is_populated(&self) -> bool {
        !self.keys.read().await.is_empty()
    }

    async fn find(&self, kid: &str) -> Option<Jwk> {
        let keys = self.keys.read().await;
        keys.iter().find(|k| k.kid() == Some(kid)).cloned()
    }
}
