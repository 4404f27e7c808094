//! Claim sets and typed user claims.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use token_error::TokenError;

use crate::finite::check_finite;

/// Reserved claim holding the absolute expiration instant (unix seconds).
pub const EXPIRATION_CLAIM: &str = "exp";

/// A mapping of claim names to JSON values.
///
/// Keys keep their insertion order, so the serialized form is exactly the
/// order in which the caller built the set. The reserved `exp` key, when
/// present, must hold an integer timestamp; without it the token never
/// expires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// Create an empty claim set.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a claim set from any value that serializes to a JSON object.
    ///
    /// NaN and infinite floats anywhere in `value` are rejected instead of
    /// being written as `null`.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, TokenError> {
        check_finite(value).map_err(|e| TokenError::Encoding(e.to_string()))?;
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(TokenError::Encoding(format!(
                "claims must serialize to a mapping, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(TokenError::Encoding(e.to_string())),
        }
    }

    /// Interpret verified claims as a typed structure.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, TokenError> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| TokenError::MalformedToken(format!("unexpected claim layout: {}", e)))
    }

    /// Insert a claim, returning the previous value for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ClaimValue) -> Option<Value> {
        self.0.insert(key.into(), value.into_value())
    }

    /// Builder-style [`ClaimSet::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl ClaimValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert any serializable value; floats must be finite.
    pub fn try_insert<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Option<Value>, TokenError> {
        check_finite(value).map_err(|e| TokenError::Encoding(e.to_string()))?;
        let value = serde_json::to_value(value).map_err(|e| TokenError::Encoding(e.to_string()))?;
        Ok(self.0.insert(key.into(), value))
    }

    /// Builder-style [`ClaimSet::try_insert`].
    pub fn try_with<T: Serialize + ?Sized>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self, TokenError> {
        self.try_insert(key, value)?;
        Ok(self)
    }

    /// Set `exp` to an absolute unix timestamp.
    pub fn expires_at(self, timestamp: i64) -> Self {
        self.with(EXPIRATION_CLAIM, timestamp)
    }

    /// Set `exp` to `now + secs`.
    pub fn expires_in(self, now: i64, secs: i64) -> Self {
        self.expires_at(now.saturating_add(secs))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The expiration timestamp.
    ///
    /// `Ok(None)` when no `exp` claim is present; `Err` with a description
    /// when it is present but not an integer.
    pub fn expiration(&self) -> Result<Option<i64>, String> {
        match self.0.get(EXPIRATION_CLAIM) {
            None => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| match value {
                Value::Number(n) if n.is_u64() => {
                    format!("`{}` is out of i64 range: {}", EXPIRATION_CLAIM, n)
                }
                other => format!(
                    "`{}` must be an integer timestamp, got {}",
                    EXPIRATION_CLAIM,
                    json_kind(other)
                ),
            }),
        }
    }
}

/// Values accepted by [`ClaimSet::with`] without a fallible conversion.
///
/// Floats are left out because a NaN or infinity would become `null`; pass
/// them through [`ClaimSet::try_with`] or as a `serde_json::Value`.
pub trait ClaimValue {
    fn into_value(self) -> Value;
}

macro_rules! claim_value_via_into {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ClaimValue for $ty {
                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

claim_value_via_into!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, String, &str, Value,
);

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// User roles in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator with full access
    Admin,
    /// Regular user
    User,
    /// Read-only access
    Viewer,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Identity claims for a signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserClaims {
    /// User ID
    pub user_id: i64,
    /// Login name
    pub username: String,
    /// User's role
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl UserClaims {
    /// Create claims for a user that expire `expires_in_secs` after `now`.
    pub fn new(
        user_id: i64,
        username: impl Into<String>,
        role: Role,
        now: i64,
        expires_in_secs: i64,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
            exp: now.saturating_add(expires_in_secs),
        }
    }

    /// Check if the claims have expired at `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// Check if the user has admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn to_claim_set(&self) -> Result<ClaimSet, TokenError> {
        ClaimSet::from_serializable(self)
    }
}
