// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Session authentication against the remote SaaS backend.
//!
//! ## Auth Flow
//!
//! 1. The backend issues the browser an opaque session cookie: base64 JSON
//!    wrapping an OAuth2 access token (a signed JWT)
//! 2. Inbound: the cookie is decoded and the access token is verified against
//!    the backend's JWKS, refreshed when an unknown `kid` shows up
//! 3. Outbound: requests to the backend carry `Authorization: bearer <token>`;
//!    a 401/403 triggers one refresh through `/refresh` and one retry
//!
//! ## Shared State
//!
//! - `JwksCache` - published keys, replaced wholesale on refresh
//! - `RefreshCache` - old session → new session, entries expire after 5 minutes

pub mod error;
pub mod executor;
pub mod extractor;
pub mod jwks;
pub mod keys;
pub mod refresh;
pub mod token;
pub mod verifier;

pub use error::AuthError;
pub use executor::AuthenticatedClient;
pub use extractor::{Session, SessionToken};
pub use jwks::{JwksCache, Jwk};
pub use keys::{build_verification_key, VerificationKey};
pub use refresh::RefreshCache;
pub use token::AccessTokenEnvelope;
pub use verifier::{Claims, TokenVerifier};
