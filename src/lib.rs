// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Remote Auth - session authentication against a remote SaaS backend
//!
//! The backend hands browsers an opaque session cookie wrapping an OAuth2
//! access token. This crate decodes it, authorizes outbound requests with
//! transparent refresh-and-retry, and verifies inbound tokens against the
//! backend's rotating JWKS.
//!
//! ## Modules
//!
//! - `api` - Demo HTTP API handlers (Axum)
//! - `auth` - Token codec, caches, request executor and verifier
//! - `backend` - HTTP client for the backend's `/keys` and `/refresh`
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
