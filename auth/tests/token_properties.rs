//! Integration tests for token issuance and verification
//!
//! These tests exercise the public API end to end with an injected clock.

use serde_json::json;
use token_auth::{
    decode_segment, encode_segment, issue, verify_at, ClaimSet, Role, TokenError, UserClaims,
};

const SECRET: &[u8] = b"segredo-super-seguro";
const T: i64 = 1_768_935_910;

fn scenario_claims() -> ClaimSet {
    ClaimSet::new()
        .with("user_id", 123)
        .with("role", "admin")
        .expires_at(T)
}

#[test]
fn test_concrete_scenario() {
    let claims = scenario_claims();
    let token = issue(&claims, SECRET).unwrap();

    let verified = verify_at(&token, SECRET, T - 5).unwrap();
    assert_eq!(verified, claims);
    assert_eq!(verified.get("user_id"), Some(&json!(123)));

    assert_eq!(
        verify_at(&token, SECRET, T + 1),
        Err(TokenError::ExpiredToken { exp: T, now: T + 1 })
    );
}

#[test]
fn test_round_trip_without_exp_never_expires() {
    let claims = ClaimSet::new()
        .with("sub", "user-42")
        .with("admin", true)
        .with("nothing", serde_json::Value::Null)
        .try_with("score", &9.5)
        .unwrap();
    let token = issue(&claims, SECRET).unwrap();

    assert_eq!(verify_at(&token, SECRET, 0).unwrap(), claims);
    assert_eq!(verify_at(&token, SECRET, i64::MAX).unwrap(), claims);
}

#[test]
fn test_round_trip_empty_claims() {
    let token = issue(&ClaimSet::new(), SECRET).unwrap();
    assert!(verify_at(&token, SECRET, 0).unwrap().is_empty());
}

#[test]
fn test_expiration_boundary() {
    let token = issue(&ClaimSet::new().expires_at(T), SECRET).unwrap();

    assert!(verify_at(&token, SECRET, T - 1).is_ok());
    assert!(matches!(
        verify_at(&token, SECRET, T),
        Err(TokenError::ExpiredToken { .. })
    ));
    assert!(matches!(
        verify_at(&token, SECRET, T + 3600),
        Err(TokenError::ExpiredToken { .. })
    ));
}

#[test]
fn test_wrong_secret() {
    let token = issue(&scenario_claims(), b"secret-one").unwrap();
    assert_eq!(
        verify_at(&token, b"secret-two", T - 5),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn test_wrong_secret_on_expired_token_reports_signature() {
    let token = issue(&scenario_claims(), b"secret-one").unwrap();
    assert_eq!(
        verify_at(&token, b"secret-two", T + 100),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn test_every_bit_flip_is_rejected() {
    let token = issue(&scenario_claims(), SECRET).unwrap();
    let segments: Vec<&str> = token.split('.').collect();

    for (index, segment) in segments.iter().enumerate() {
        let bytes = decode_segment(segment).unwrap();
        for byte in 0..bytes.len() {
            for bit in 0..8 {
                let mut flipped = bytes.clone();
                flipped[byte] ^= 1 << bit;

                let mut parts: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
                parts[index] = encode_segment(&flipped);
                let tampered = parts.join(".");

                let result = verify_at(&tampered, SECRET, T - 5);
                let acceptable = match (&result, index) {
                    (Err(TokenError::InvalidSignature), _) => true,
                    (Err(TokenError::MalformedToken(_)), _) => true,
                    // A flip inside "HS256" yields another algorithm name.
                    (Err(TokenError::UnsupportedAlgorithm(_)), 0) => true,
                    _ => false,
                };
                assert!(
                    acceptable,
                    "segment {index} byte {byte} bit {bit}: {result:?}"
                );
            }
        }
    }
}

#[test]
fn test_claims_segment_swap_is_rejected() {
    let alice = issue(&ClaimSet::new().with("user", "alice"), SECRET).unwrap();
    let mallory = issue(&ClaimSet::new().with("user", "mallory"), b"other").unwrap();

    let a: Vec<&str> = alice.split('.').collect();
    let m: Vec<&str> = mallory.split('.').collect();
    let spliced = format!("{}.{}.{}", a[0], m[1], a[2]);

    assert_eq!(verify_at(&spliced, SECRET, 0), Err(TokenError::InvalidSignature));
}

#[test]
fn test_algorithm_downgrade() {
    let token = issue(&scenario_claims(), SECRET).unwrap();
    let segments: Vec<&str> = token.split('.').collect();

    for alg in ["none", "None", "HS384", "HS512", "RS256", "ES256", "hs256", ""] {
        let header = encode_segment(format!(r#"{{"alg":"{alg}","typ":"JWT"}}"#).as_bytes());
        let downgraded = format!("{}.{}.{}", header, segments[1], segments[2]);
        assert_eq!(
            verify_at(&downgraded, SECRET, T - 5),
            Err(TokenError::UnsupportedAlgorithm(alg.to_string())),
            "alg {alg:?}"
        );
    }
}

#[test]
fn test_padded_token_is_malformed() {
    let token = issue(&ClaimSet::new().with("k", "v"), SECRET).unwrap();
    let segments: Vec<&str> = token.split('.').collect();
    let padded = format!("{}=.{}.{}", segments[0], segments[1], segments[2]);
    assert!(matches!(
        verify_at(&padded, SECRET, 0),
        Err(TokenError::MalformedToken(_))
    ));
}

#[test]
fn test_typed_user_claims() {
    let user = UserClaims::new(123, "rafael", Role::Admin, T - 5, 5);
    let token = issue(&user.to_claim_set().unwrap(), SECRET).unwrap();

    let decoded: UserClaims = verify_at(&token, SECRET, T - 1)
        .unwrap()
        .to_typed()
        .unwrap();
    assert_eq!(decoded, user);
    assert!(decoded.is_admin());
}

#[test]
fn test_concurrent_use() {
    let claims = scenario_claims();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let claims = claims.clone().with("worker", i);
            std::thread::spawn(move || {
                let token = issue(&claims, SECRET).unwrap();
                verify_at(&token, SECRET, T - 5).unwrap() == claims
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
