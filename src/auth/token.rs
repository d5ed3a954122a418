// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Opaque session token codec.
//!
//! The session cookie handed to browsers is not the access token itself but
//! unpadded standard base64 of the backend's OAuth2 token JSON. Decoding it
//! yields the bearer credential sent to protected resources.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Decoded form of an opaque session token.
///
/// Mirrors the OAuth2 token fields issued by the backend. Unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenEnvelope {
    /// Bearer credential for protected resources (a signed JWT)
    pub access_token: String,

    /// Token type, usually `bearer`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Refresh token, if the backend issued one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Absolute expiry of the access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,

    /// Relative lifetime in seconds, as sent by some token endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

impl AccessTokenEnvelope {
    /// Envelope carrying only an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: None,
            refresh_token: None,
            expiry: None,
            expires_in: None,
        }
    }
}

/// Decode an opaque session token into its access token envelope.
pub fn decode(opaque: &str) -> Result<AccessTokenEnvelope, AuthError> {
    let raw = STANDARD_NO_PAD
        .decode(opaque.trim())
        .map_err(|e| AuthError::Decode(format!("invalid base64: {e}")))?;

    let envelope: AccessTokenEnvelope = serde_json::from_slice(&raw)
        .map_err(|e| AuthError::Decode(format!("invalid token JSON: {e}")))?;

    if envelope.access_token.is_empty() {
        return Err(AuthError::Decode("access token is empty".to_string()));
    }

    Ok(envelope)
}

/// Encode an access token envelope as an opaque session token.
pub fn encode(envelope: &AccessTokenEnvelope) -> Result<String, AuthError> {
    let json = serde_json::to_vec(envelope)
        .map_err(|e| AuthError::Decode(format!("failed to serialize token: {e}")))?;
    Ok(STANDARD_NO_PAD.encode(json))
}
