// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Every stage of the token lifecycle fails with its own variant so callers
/// can tell a malformed cookie from a backend outage or a rotated key.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session cookie present on the inbound request
    #[error("Session cookie is required")]
    MissingSessionCookie,

    /// Opaque session token is not base64 JSON of an OAuth2 token
    #[error("Session token could not be decoded: {0}")]
    Decode(String),

    /// Access token could not be parsed (before signature verification)
    #[error("Access token is malformed: {0}")]
    UnverifiedParse(String),

    /// Key set fetch failed (transport, status or body)
    #[error("Failed to fetch key set: {0}")]
    Fetch(String),

    /// Key id absent from the key set even after a refresh
    #[error("No key with id {0:?} in key set")]
    KeyNotFound(String),

    /// Published key has an invalid modulus or unsupported exponent
    #[error("Invalid key material: {0}")]
    KeyFormat(String),

    /// Refresh endpoint failed or returned no token
    #[error("Token refresh failed: {0}")]
    Refresh(String),

    /// Outbound request to a protected resource failed to execute
    #[error("Request to protected resource failed: {0}")]
    Request(String),

    /// Verified claims are not a JSON object
    #[error("Token claims have an unexpected shape: {0}")]
    Claims(String),

    /// Signature or time-claim check failed
    #[error("Token verification failed: {0}")]
    Verify(String),

    /// Outbound HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingSessionCookie => "missing_session_cookie",
            AuthError::Decode(_) => "malformed_session_token",
            AuthError::UnverifiedParse(_) => "malformed_token",
            AuthError::Fetch(_) => "jwks_fetch_error",
            AuthError::KeyNotFound(_) => "no_matching_key",
            AuthError::KeyFormat(_) => "invalid_key_format",
            AuthError::Refresh(_) => "token_refresh_failed",
            AuthError::Request(_) => "upstream_request_failed",
            AuthError::Claims(_) => "invalid_claims",
            AuthError::Verify(_) => "invalid_token",
            AuthError::ClientSetup(_) => "client_setup_failed",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingSessionCookie
            | AuthError::Decode(_)
            | AuthError::UnverifiedParse(_)
            | AuthError::KeyNotFound(_)
            | AuthError::Refresh(_)
            | AuthError::Claims(_)
            | AuthError::Verify(_) => StatusCode::UNAUTHORIZED,
            AuthError::Fetch(_) | AuthError::Request(_) => StatusCode::BAD_GATEWAY,
            AuthError::KeyFormat(_) | AuthError::ClientSetup(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
