// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RSA verification keys rebuilt from JWKS entries.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::DecodingKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};

use super::error::AuthError;
use super::jwks::Jwk;

/// The only public exponent the backend publishes.
const RSA_EXPONENT_F4: u32 = 65537;

/// Base64url encodings of 65537 (`[1, 0, 1]` and `[0, 1, 0, 1]`).
const F4_ENCODINGS: [&str; 2] = ["AQAB", "AAEAAQ"];

/// Public key ready for signature verification.
pub struct VerificationKey {
    public_key: RsaPublicKey,
    decoding_key: DecodingKey,
}

impl VerificationKey {
    /// Key for `jsonwebtoken::decode`.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// RSA public exponent.
    pub fn exponent(&self) -> &BigUint {
        self.public_key.e()
    }

    /// RSA modulus size in bits.
    pub fn modulus_bits(&self) -> usize {
        self.public_key.n().bits()
    }
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationKey")
            .field("modulus_bits", &self.modulus_bits())
            .field("exponent", self.exponent())
            .finish()
    }
}

/// Build a verification key from a JWKS entry.
///
/// Only the exponent 65537 is accepted; any other `e` is a
/// [`AuthError::KeyFormat`] error.
pub fn build_verification_key(jwk: &Jwk) -> Result<VerificationKey, AuthError> {
    let n = jwk
        .get("n")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AuthError::KeyFormat("key has no modulus".to_string()))?;

    let modulus = URL_SAFE_NO_PAD
        .decode(n)
        .map_err(|e| AuthError::KeyFormat(format!("modulus is not base64url: {e}")))?;

    let exponent = match jwk.get("e") {
        Some(e) if F4_ENCODINGS.contains(&e) => RSA_EXPONENT_F4,
        Some(e) => {
            return Err(AuthError::KeyFormat(format!(
                "unsupported public exponent {e:?}"
            )))
        }
        None => return Err(AuthError::KeyFormat("key has no exponent".to_string())),
    };

    let public_key = RsaPublicKey::new(
        BigUint::from_bytes_be(&modulus),
        BigUint::from(exponent),
    )
    .map_err(|e| AuthError::KeyFormat(format!("invalid RSA public key: {e}")))?;

    let pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| AuthError::KeyFormat(format!("failed to encode public key: {e}")))?;

    let decoding_key = DecodingKey::from_rsa_pem(pem.as_bytes())
        .map_err(|e| AuthError::KeyFormat(format!("failed to load public key: {e}")))?;

    Ok(VerificationKey {
        public_key,
        decoding_key,
    })
}
