//! HS256 signed token issuance and verification.
//!
//! Tokens are three unpadded base64url segments, `header.claims.signature`,
//! signed with HMAC-SHA256 over a caller-supplied shared secret. Both
//! operations are pure functions of their inputs: nothing is cached and the
//! secret is never retained.
//!
//! ```
//! use token_auth::{issue, verify_at, ClaimSet};
//!
//! let claims = ClaimSet::new()
//!     .with("user_id", 123)
//!     .with("role", "admin")
//!     .expires_at(1_700_000_005);
//!
//! let token = issue(&claims, b"segredo-super-seguro").unwrap();
//! let verified = verify_at(&token, b"segredo-super-seguro", 1_700_000_000).unwrap();
//! assert_eq!(verified, claims);
//! ```

mod claims;
mod config;
mod encoding;
mod finite;
mod issuer;
mod verifier;

pub use claims::{ClaimSet, ClaimValue, Role, UserClaims, EXPIRATION_CLAIM};
pub use config::{TokenConfig, DEFAULT_EXPIRES_IN_SECS};
pub use encoding::{decode_segment, encode_segment, now_timestamp, ALGORITHM};
pub use issuer::issue;
pub use verifier::{verify, verify_at};

pub use token_error::{ErrorResponse, Result, TokenError};
