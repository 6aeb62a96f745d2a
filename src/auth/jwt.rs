use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::users::Role;

/// JWT claims issued by the identity provider.
///
/// `sub` carries the numeric user id and `role` is either `"planner"` or `"couple"`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    pub iat: Option<usize>,
    pub role: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Claims {
    /// Extract the numeric user id from the `sub` claim.
    pub fn user_id(&self) -> Result<i64, String> {
        self.sub
            .parse()
            .map_err(|e| format!("Invalid user id in sub claim: {e}"))
    }

    pub fn role(&self) -> Result<Role, String> {
        self.role.parse().map_err(|e: crate::error::AppError| e.to_string())
    }

    /// Best-effort display name: the `name` claim, else the local part of the email.
    pub fn display_name(&self) -> Option<String> {
        self.name.clone().or_else(|| {
            self.email
                .as_deref()
                .and_then(|e| e.split('@').next())
                .map(str::to_string)
        })
    }
}

/// Validate an HS256 JWT against the shared secret and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Token validation failed: {e}"))
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);
