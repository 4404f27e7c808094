//! Segment encoding and HMAC utilities shared by the issuer and verifier.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use token_error::{Result, TokenError};

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// The only algorithm identifier this crate issues or accepts.
pub const ALGORITHM: &str = "HS256";

/// Encode bytes as unpadded base64url.
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode an unpadded base64url segment.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::MalformedToken(format!("invalid base64url segment: {}", e)))
}

/// Build an HMAC-SHA256 key from a shared secret.
pub(crate) fn hmac_key(secret: &[u8]) -> Result<HmacSha256> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }
    HmacSha256::new_from_slice(secret).map_err(|e| {
        tracing::error!("Failed to create HMAC key: {}", e);
        TokenError::InvalidSecret
    })
}

/// Check `signature` against the MAC of `signing_input` in constant time.
pub(crate) fn verify_signature(
    mut key: HmacSha256,
    signing_input: &str,
    signature: &[u8],
) -> Result<()> {
    key.update(signing_input.as_bytes());
    key.verify_slice(signature)
        .map_err(|_| TokenError::InvalidSignature)
}

/// Current wall-clock time in seconds since the Unix epoch.
pub fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
