// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Remote SaaS backend client.
//!
//! The backend exposes two endpoints the token lifecycle depends on:
//!
//! - `GET <base>/keys` returns the published JWKS
//! - `POST <base>/refresh` exchanges an opaque session token for a new one

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::auth::error::AuthError;
use crate::auth::jwks::{parse_key_set, Jwk};
use crate::config::RemoteAuthConfig;

/// Capabilities the caches need from the remote backend.
pub trait RemoteBackend: Send + Sync + 'static {
    /// Fetch the currently published signing keys.
    fn fetch_keys(&self) -> impl Future<Output = Result<Vec<Jwk>, AuthError>> + Send;

    /// Exchange an opaque session token for a freshly issued one.
    fn refresh_token(&self, token: &str)
        -> impl Future<Output = Result<String, AuthError>> + Send;
}

/// HTTP implementation of [`RemoteBackend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    token_field: String,
    http: Client,
}

impl HttpBackend {
    /// Create a backend client for `base_url`.
    ///
    /// Every request made through this client is bounded by `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        token_field: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::ClientSetup(e.to_string()))?;

        Ok(Self::with_client(base_url, token_field, http))
    }

    /// Create a backend client from the runtime configuration.
    pub fn from_config(config: &RemoteAuthConfig) -> Result<Self, AuthError> {
        Self::new(&config.base_url, &config.token_field, config.http_timeout)
    }

    /// Create a backend client sharing an existing HTTP client.
    pub fn with_client(
        base_url: impl Into<String>,
        token_field: impl Into<String>,
        http: Client,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token_field: token_field.into(),
            http,
        }
    }

    /// Backend base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a backend path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The shared HTTP client.
    pub fn http(&self) -> &Client {
        &self.http
    }
}

impl RemoteBackend for HttpBackend {
    async fn fetch_keys(&self) -> Result<Vec<Jwk>, AuthError> {
        let response = self
            .http
            .get(self.url("keys"))
            .send()
            .await
            .map_err(|e| AuthError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Fetch(format!(
                "HTTP {} from keys endpoint",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::Fetch(e.to_string()))?;

        parse_key_set(&body)
    }

    async fn refresh_token(&self, token: &str) -> Result<String, AuthError> {
        let payload = HashMap::from([(self.token_field.as_str(), token)]);

        let response = self
            .http
            .post(self.url("refresh"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuthError::Refresh(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Refresh(format!(
                "HTTP {} from refresh endpoint",
                response.status()
            )));
        }

        let body: HashMap<String, Value> = response
            .json()
            .await
            .map_err(|e| AuthError::Refresh(format!("invalid refresh response: {e}")))?;

        body.get(&self.token_field)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                AuthError::Refresh(format!(
                    "refresh response has no \"{}\" field",
                    self.token_field
                ))
            })
    }
}
