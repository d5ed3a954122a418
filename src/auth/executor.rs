// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Outbound requests authorized with a session's access token.
//!
//! A protected resource answering 401 or 403 usually means the access token
//! inside the session has expired. The executor then refreshes the session
//! through the [`RefreshCache`] and re-issues the request once. Whatever the
//! second attempt returns is handed back to the caller.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, Request, RequestBuilder, Response, StatusCode};
use tracing::warn;

use super::error::AuthError;
use super::refresh::RefreshCache;
use super::token;
use crate::backend::RemoteBackend;

/// HTTP client that authorizes requests on behalf of a session.
pub struct AuthenticatedClient<B> {
    http: Client,
    refresh: Arc<RefreshCache<B>>,
}

impl<B> Clone for AuthenticatedClient<B> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            refresh: Arc::clone(&self.refresh),
        }
    }
}

impl<B: RemoteBackend> AuthenticatedClient<B> {
    /// Create a client sending requests through `http`.
    ///
    /// Outbound timeouts are whatever `http` was built with.
    pub fn new(http: Client, refresh: Arc<RefreshCache<B>>) -> Self {
        Self { http, refresh }
    }

    /// Start building a request to be passed to [`execute`](Self::execute).
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Execute `request` authorized by the opaque session token.
    ///
    /// On 401/403 the session is refreshed and the request re-issued exactly
    /// once. A request whose body cannot be replayed is not retried.
    pub async fn execute(&self, request: Request, opaque: &str) -> Result<Response, AuthError> {
        let replay = request.try_clone();

        let response = self.send_authorized(request, opaque).await?;
        if !is_auth_failure(response.status()) {
            return Ok(response);
        }

        let Some(replay) = replay else {
            warn!(
                status = %response.status(),
                "Request rejected but its body cannot be replayed, not retrying"
            );
            return Ok(response);
        };

        warn!(
            status = %response.status(),
            url = %replay.url(),
            "Request rejected, retrying with refreshed session token"
        );
        let refreshed = self.refresh.refresh(opaque).await?;
        self.send_authorized(replay, &refreshed).await
    }

    async fn send_authorized(
        &self,
        mut request: Request,
        opaque: &str,
    ) -> Result<Response, AuthError> {
        let envelope = token::decode(opaque)?;

        let mut value = HeaderValue::from_str(&format!("bearer {}", envelope.access_token))
            .map_err(|_| {
                AuthError::Decode("access token is not a valid header value".to_string())
            })?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);

        self.http.execute(request).await.map_err(|e| {
            warn!(error = %e, "Request to protected resource failed");
            AuthError::Request(e.to_string())
        })
    }
}

fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}
