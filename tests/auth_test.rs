///! Integration test for JWT auth validation.
///!
///! Tokens are minted locally with the same HS256 secret the server uses and
///! run through `validate_token`. No running server or database is needed.
///!
///! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use sunsu_backend::auth::jwt::{Claims, validate_token};
use sunsu_backend::models::users::Role;

const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn claims_for(sub: &str, role: &str, exp_offset: i64) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: sub.to_string(),
        exp: (now + exp_offset) as usize,
        iat: Some(now as usize),
        role: role.to_string(),
        email: Some("alice@example.com".to_string()),
        name: Some("Alice Kim".to_string()),
    }
}

fn mint(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

#[test]
fn test_valid_token_decodes_correctly() {
    let token = mint(&claims_for("42", "planner", 3600), TEST_SECRET);

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.user_id().unwrap(), 42);
    assert_eq!(claims.role().unwrap(), Role::Planner);
    assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
    assert_eq!(claims.display_name().unwrap(), "Alice Kim");
}

#[test]
fn test_expired_token_is_rejected() {
    // Well past the 60s default leeway.
    let token = mint(&claims_for("7", "couple", -300), TEST_SECRET);

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = mint(&claims_for("7", "couple", 3600), TEST_SECRET);

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(validate_token("not.a.valid.jwt", TEST_SECRET).is_err());
}

#[test]
fn test_non_numeric_subject_is_rejected() {
    let claims = claims_for("not-a-number", "couple", 3600);
    assert!(claims.user_id().is_err());
}

#[test]
fn test_unknown_role_is_rejected() {
    let claims = claims_for("1", "admin", 3600);
    assert!(claims.role().is_err());
}

#[test]
fn test_display_name_falls_back_to_email_local_part() {
    let mut claims = claims_for("1", "couple", 3600);
    claims.name = None;
    assert_eq!(claims.display_name().unwrap(), "alice");

    claims.email = None;
    assert!(claims.display_name().is_none());
}
