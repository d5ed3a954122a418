// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for session cookies.
//!
//! Use `Session` in handlers that need a verified caller, `SessionToken` in
//! handlers that only forward the session to the backend:
//!
//! ```rust,ignore
//! async fn whoami(session: Session) -> Json<Claims> {
//!     Json(session.claims)
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
};
use tracing::warn;

use super::{AuthError, Claims};
use crate::state::AppState;

/// Opaque session token taken from the session cookie, unverified.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        cookie_value(&parts.headers, &state.config.token_field)
            .map(SessionToken)
            .ok_or(AuthError::MissingSessionCookie)
    }
}

/// Verified session: the opaque token and the claims of its access token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;

        let claims = state.verifier.verify(&token).await.inspect_err(|e| {
            warn!(error = %e, error_code = e.error_code(), "Session verification failed");
        })?;

        Ok(Session { token, claims })
    }
}

/// Find the value of cookie `name` across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.trim_matches('"').to_string())
}
