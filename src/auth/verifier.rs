// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Verification of inbound session tokens.
//!
//! ## Flow
//!
//! 1. Decode the opaque session token into its access token
//! 2. Read `kid` from the access token header (no verification yet)
//! 3. Resolve `kid` through the JWKS cache (one forced refresh on miss)
//! 4. Rebuild the RSA verification key from the JWKS entry
//! 5. Verify signature and time claims, return the claims

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde_json::{Map, Value};
use tracing::debug;

use super::error::AuthError;
use super::jwks::JwksCache;
use super::keys::build_verification_key;
use super::token;
use crate::backend::RemoteBackend;

/// Default clock skew tolerance (60 seconds).
pub const DEFAULT_LEEWAY_SECS: u64 = 60;

/// RSA signature algorithms the backend may sign with.
const RSA_ALGORITHMS: [Algorithm; 6] = [
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
];

/// Verified token claims.
pub type Claims = Map<String, Value>;

/// Verifies opaque session tokens against the backend's published keys.
pub struct TokenVerifier<B> {
    jwks: JwksCache<B>,
    leeway: u64,
}

impl<B> Clone for TokenVerifier<B> {
    fn clone(&self) -> Self {
        Self {
            jwks: self.jwks.clone(),
            leeway: self.leeway,
        }
    }
}

impl<B: RemoteBackend> TokenVerifier<B> {
    /// Create a verifier resolving keys through `jwks`.
    pub fn new(jwks: JwksCache<B>) -> Self {
        Self {
            jwks,
            leeway: DEFAULT_LEEWAY_SECS,
        }
    }

    /// Create with custom clock skew leeway.
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway = leeway_secs;
        self
    }

    /// The key cache used by this verifier.
    pub fn jwks(&self) -> &JwksCache<B> {
        &self.jwks
    }

    /// Verify an opaque session token and return its claims.
    pub async fn verify(&self, opaque: &str) -> Result<Claims, AuthError> {
        let envelope = token::decode(opaque)?;
        let access_token = envelope.access_token.as_str();

        let header =
            decode_header(access_token).map_err(|e| AuthError::UnverifiedParse(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::UnverifiedParse("token header has no kid".to_string()))?;

        let jwk = self.jwks.lookup(&kid).await?;
        let key = build_verification_key(&jwk)?;

        let mut validation = Validation::new(header.alg);
        validation.algorithms = RSA_ALGORITHMS.to_vec();
        validation.leeway = self.leeway;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(access_token, key.decoding_key(), &validation).map_err(
            |e| match e.kind() {
                ErrorKind::Json(_) => AuthError::Claims(e.to_string()),
                _ => AuthError::Verify(e.to_string()),
            },
        )?;

        debug!(kid = %kid, "Verified session token");
        Ok(data.claims)
    }
}
