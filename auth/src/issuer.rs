//! Token issuance.

use jwt::header::HeaderType;
use jwt::{AlgorithmType, Header, SignWithKey, Token};
use token_error::{Result, TokenError};

use crate::claims::ClaimSet;
use crate::encoding::hmac_key;

/// The fixed header written into every issued token: `{"alg":"HS256","typ":"JWT"}`.
fn header() -> Header {
    Header {
        algorithm: AlgorithmType::Hs256,
        type_: Some(HeaderType::JsonWebToken),
        ..Default::default()
    }
}

/// Sign a claim set into a compact `header.claims.signature` token.
///
/// The claims are serialized in insertion order with compact separators and
/// each segment is unpadded base64url. A present `exp` must already be an
/// absolute integer timestamp.
pub fn issue(claims: &ClaimSet, secret: &[u8]) -> Result<String> {
    let key = hmac_key(secret)?;

    if let Err(reason) = claims.expiration() {
        tracing::error!("Refusing to issue token: {}", reason);
        return Err(TokenError::Encoding(reason));
    }

    let token = Token::new(header(), claims)
        .sign_with_key(&key)
        .map_err(|e| {
            tracing::error!("Failed to encode token: {}", e);
            TokenError::Encoding(e.to_string())
        })?;

    tracing::debug!(claims = claims.len(), "Issued token");
    Ok(token.into())
}
