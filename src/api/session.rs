// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use reqwest::Method;
use serde_json::Value;

use crate::auth::{Claims, Session, SessionToken};
use crate::error::{ApiError, HandlerError};
use crate::state::AppState;

/// Return the verified claims of the caller's session.
pub async fn current_session(session: Session) -> Json<Claims> {
    Json(session.claims)
}

/// Fetch the caller's profile from the backend's `/user` endpoint.
///
/// The request is authorized with the session cookie and transparently
/// retried once with a refreshed session if the backend rejects it. The
/// backend's status is always relayed; a body that is empty or not JSON is
/// relayed as `null`.
pub async fn remote_user(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<(StatusCode, Json<Value>), HandlerError> {
    let request = state
        .client
        .request(Method::GET, &state.backend.url("user"))
        .build()
        .map_err(|e| ApiError::bad_gateway(format!("failed to build user request: {e}")))?;

    let response = state.client.execute(request, &token).await?;
    let status = response.status();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::bad_gateway(format!("failed to read user response: {e}")))?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    Ok((status, Json(body)))
}
