//! Token verification.
//!
//! Checks run in a fixed order: structure, header and algorithm, signature,
//! claim layout, expiration. Nothing from the claims segment is parsed until
//! the signature has been confirmed.

use serde::Deserialize;
use token_error::{Result, TokenError};

use crate::claims::ClaimSet;
use crate::encoding::{decode_segment, hmac_key, now_timestamp, verify_signature, ALGORITHM};

/// Only `alg` is inspected; `typ` and any other header fields are ignored.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// Verify a token against the current wall-clock time.
pub fn verify(token: &str, secret: &[u8]) -> Result<ClaimSet> {
    verify_at(token, secret, now_timestamp())
}

/// Verify a token as of `now` (unix seconds).
///
/// Returns the claims only when the signature matches and any `exp` lies
/// strictly after `now`.
pub fn verify_at(token: &str, secret: &[u8], now: i64) -> Result<ClaimSet> {
    let result = verify_inner(token, secret, now);
    match &result {
        Ok(claims) => tracing::debug!(claims = claims.len(), "Token verified"),
        Err(e) => tracing::warn!(code = e.code(), "Token rejected: {}", e),
    }
    result
}

fn verify_inner(token: &str, secret: &[u8], now: i64) -> Result<ClaimSet> {
    let key = hmac_key(secret)?;

    let segments: Vec<&str> = token.split('.').collect();
    let [header_seg, claims_seg, signature_seg] = segments.as_slice() else {
        return Err(TokenError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };
    if segments.iter().any(|s| s.is_empty()) {
        return Err(TokenError::MalformedToken("empty segment".to_string()));
    }

    let header_bytes = decode_segment(header_seg)?;
    let claims_bytes = decode_segment(claims_seg)?;
    let signature = decode_segment(signature_seg)?;

    let header: RawHeader = serde_json::from_slice(&header_bytes)
        .map_err(|e| TokenError::MalformedToken(format!("invalid header: {}", e)))?;
    if header.alg != ALGORITHM {
        return Err(TokenError::UnsupportedAlgorithm(header.alg));
    }

    let signing_input = &token[..header_seg.len() + 1 + claims_seg.len()];
    verify_signature(key, signing_input, &signature)?;

    let claims: ClaimSet = serde_json::from_slice(&claims_bytes)
        .map_err(|e| TokenError::MalformedToken(format!("claims are not a mapping: {}", e)))?;

    if let Some(exp) = claims.expiration().map_err(TokenError::MalformedToken)? {
        if exp <= now {
            return Err(TokenError::ExpiredToken { exp, now });
        }
    }

    Ok(claims)
}
