//! Error types for signed token issuance and verification.
//!
//! Every failure is terminal and reported synchronously; nothing here is
//! retried. A rejected token never yields partially trusted claims.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The shared secret was empty.
    #[error("Invalid secret: must not be empty")]
    InvalidSecret,

    /// The claims could not be serialized to their canonical form.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The token is not three well-formed base64url segments with a valid
    /// header and claim mapping.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// The header names an algorithm outside the allow-list.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The signature does not match the header and claims under this secret.
    #[error("Invalid signature")]
    InvalidSignature,

    /// `exp` is at or before the verification instant.
    #[error("Token expired at {exp} (now {now})")]
    ExpiredToken { exp: i64, now: i64 },
}

impl TokenError {
    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InvalidSecret => "TOKEN_INVALID_SECRET",
            TokenError::Encoding(_) => "TOKEN_ENCODING_FAILED",
            TokenError::MalformedToken(_) => "TOKEN_MALFORMED",
            TokenError::UnsupportedAlgorithm(_) => "TOKEN_UNSUPPORTED_ALGORITHM",
            TokenError::InvalidSignature => "TOKEN_INVALID_SIGNATURE",
            TokenError::ExpiredToken { .. } => "TOKEN_EXPIRED",
        }
    }
}

/// Error response for API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        let message = match err {
            TokenError::InvalidSecret => "Secret must not be empty",
            TokenError::Encoding(_) => "Failed to encode claims",
            TokenError::MalformedToken(_) => "Token is malformed",
            TokenError::UnsupportedAlgorithm(_) => "Token algorithm is not accepted",
            TokenError::InvalidSignature => "Token signature is invalid",
            TokenError::ExpiredToken { .. } => "Token has expired",
        };
        let response = Self::new(err.code(), message);
        match err {
            TokenError::Encoding(detail)
            | TokenError::MalformedToken(detail)
            | TokenError::UnsupportedAlgorithm(detail) => response.with_details(detail.clone()),
            TokenError::ExpiredToken { exp, .. } => response.with_details(format!("exp={exp}")),
            TokenError::InvalidSecret | TokenError::InvalidSignature => response,
        }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias using TokenError.
pub type Result<T> = std::result::Result<T, TokenError>;
