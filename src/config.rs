// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `REMOTE_PROVIDER_URL` | Base URL of the SaaS backend (`/refresh`, `/keys`, `/user`) | Required |
//! | `REMOTE_TOKEN_NAME` | Session cookie name and refresh JSON field | `token` |
//! | `REMOTE_HTTP_TIMEOUT_SECS` | Timeout for every outbound HTTP call | `10` |
//! | `REFRESH_CACHE_TTL_SECS` | Retention of refreshed session tokens | `300` |
//! | `JWT_LEEWAY_SECS` | Clock skew tolerance for `exp`/`nbf` | `60` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::auth::refresh::DEFAULT_RETENTION;
use crate::auth::verifier::DEFAULT_LEEWAY_SECS;

/// Backend base URL.
pub const REMOTE_PROVIDER_URL_ENV: &str = "REMOTE_PROVIDER_URL";

/// Name of the session cookie, also the token field of `/refresh` bodies.
pub const REMOTE_TOKEN_NAME_ENV: &str = "REMOTE_TOKEN_NAME";

/// Outbound HTTP timeout in seconds.
pub const REMOTE_HTTP_TIMEOUT_ENV: &str = "REMOTE_HTTP_TIMEOUT_SECS";

/// Refresh cache retention in seconds.
pub const REFRESH_CACHE_TTL_ENV: &str = "REFRESH_CACHE_TTL_SECS";

/// JWT clock skew leeway in seconds.
pub const JWT_LEEWAY_ENV: &str = "JWT_LEEWAY_SECS";

/// Default session cookie name.
pub const DEFAULT_TOKEN_NAME: &str = "token";

/// Default outbound HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings of the remote authentication subsystem.
#[derive(Debug, Clone)]
pub struct RemoteAuthConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,
    /// Session cookie name and refresh JSON field
    pub token_field: String,
    /// Timeout applied to every outbound call
    pub http_timeout: Duration,
    /// How long a refreshed token stays in the refresh cache
    pub refresh_retention: Duration,
    /// Clock skew tolerance for time claims
    pub jwt_leeway_secs: u64,
}

impl RemoteAuthConfig {
    /// Configuration with defaults for everything but the backend URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token_field: DEFAULT_TOKEN_NAME.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            refresh_retention: DEFAULT_RETENTION,
            jwt_leeway_secs: DEFAULT_LEEWAY_SECS,
        })
    }

    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(REMOTE_PROVIDER_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(REMOTE_PROVIDER_URL_ENV))?;
        let mut config = Self::new(&base_url)?;

        if let Some(name) = lookup(REMOTE_TOKEN_NAME_ENV).filter(|v| !v.is_empty()) {
            config.token_field = name;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, REMOTE_HTTP_TIMEOUT_ENV)? {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, REFRESH_CACHE_TTL_ENV)? {
            config.refresh_retention = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, JWT_LEEWAY_ENV)? {
            config.jwt_leeway_secs = secs;
        }

        Ok(config)
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: REMOTE_PROVIDER_URL_ENV,
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => Err(ConfigError::Invalid {
            name,
            value: value.clone(),
            reason: e.to_string(),
        }),
    }
}
