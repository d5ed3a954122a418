// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AuthError, AuthenticatedClient, JwksCache, RefreshCache, TokenVerifier};
use crate::backend::HttpBackend;
use crate::config::RemoteAuthConfig;

/// Shared application state.
///
/// Holds the process-wide key cache and refresh cache. Built once at startup;
/// clones share the same caches.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RemoteAuthConfig>,
    pub backend: Arc<HttpBackend>,
    pub verifier: TokenVerifier<HttpBackend>,
    pub client: AuthenticatedClient<HttpBackend>,
}

impl AppState {
    pub fn new(config: RemoteAuthConfig) -> Result<Self, AuthError> {
        let backend = Arc::new(HttpBackend::from_config(&config)?);

        let jwks = JwksCache::new(Arc::clone(&backend));
        let verifier = TokenVerifier::new(jwks).with_leeway(config.jwt_leeway_secs);

        let refresh = Arc::new(
            RefreshCache::new(Arc::clone(&backend)).with_retention(config.refresh_retention),
        );
        let client = AuthenticatedClient::new(backend.http().clone(), refresh);

        Ok(Self {
            config: Arc::new(config),
            backend,
            verifier,
            client,
        })
    }
}
