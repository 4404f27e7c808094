//! Token configuration.

use std::fmt;

use token_error::Result;

use crate::claims::ClaimSet;
use crate::issuer::issue;
use crate::verifier::verify;

/// Lifetime given to tokens when none is configured.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 5;

/// Token configuration.
#[derive(Clone)]
pub struct TokenConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token validity duration in seconds
    pub expires_in_secs: i64,
}

impl TokenConfig {
    /// Create a new token configuration.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expires_in_secs: DEFAULT_EXPIRES_IN_SECS,
        }
    }

    /// Set the token lifetime.
    pub fn with_expires_in(mut self, secs: i64) -> Self {
        self.expires_in_secs = secs;
        self
    }

    /// Create configuration from environment variables
    ///
    /// Reads `TOKEN_SECRET` and `TOKEN_EXPIRES_IN_SECS`; values that fail to
    /// parse leave the default in place.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(secret) = std::env::var("TOKEN_SECRET") {
            config.secret = secret;
        }

        if let Ok(expires_in) = std::env::var("TOKEN_EXPIRES_IN_SECS") {
            if let Ok(n) = expires_in.parse() {
                config.expires_in_secs = n;
            }
        }

        config
    }

    /// Stamp `exp = now + expires_in_secs` onto the claims and sign them.
    pub fn issue_for(&self, claims: ClaimSet, now: i64) -> Result<String> {
        issue(&claims.expires_in(now, self.expires_in_secs), self.secret.as_bytes())
    }

    /// Verify a token with the configured secret against the wall clock.
    pub fn verify(&self, token: &str) -> Result<ClaimSet> {
        verify(token, self.secret.as_bytes())
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}
