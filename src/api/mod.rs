// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod health;
pub mod session;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/session", get(session::current_session))
        .route("/user", get(session::remote_user));

    Router::new()
        .route("/health", get(health::liveness))
        .route("/ready", get(health::readiness))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
