use actix_web::FromRequest;
use actix_web::{HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::authorization::Identity;
use crate::auth::jwt::{self, JwtSecret};
use crate::db::users::find_or_create_from_auth;
use crate::error::AppError;
use crate::models::users::{self, CreateUserFromAuth};

pub struct AuthenticatedUser(pub users::Model);

impl AuthenticatedUser {
    /// The `(role, id)` pair every authorization check works from.
    pub fn identity(&self) -> Identity {
        Identity {
            role: self.0.role,
            id: self.0.id,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                AppError::Unauthorized("Authorization header must be: Bearer <token>".into())
            })?;

            // 2. Validate the JWT with the shared secret.
            let secret = req.app_data::<web::Data<JwtSecret>>().ok_or_else(|| {
                AppError::Internal("JWT secret not configured".into())
            })?;

            let claims = jwt::validate_token(token, &secret.0)
                .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))?;

            // 3. Extract user info from claims.
            let user_id = claims.user_id().map_err(AppError::Unauthorized)?;
            let role = claims.role().map_err(AppError::Unauthorized)?;
            let email = claims
                .email
                .clone()
                .ok_or_else(|| AppError::Unauthorized("No email in token claims".into()))?;
            let name = claims.display_name().unwrap_or_else(|| email.clone());

            tracing::debug!(user_id, %role, "Validated bearer token");

            // 4. Get the database connection.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| AppError::Internal("Database not configured".into()))?;

            // 5. Find or create the user.
            let user = find_or_create_from_auth(
                db.get_ref(),
                CreateUserFromAuth {
                    id: user_id,
                    email,
                    name,
                    role,
                },
            )
            .await?;

            Ok(AuthenticatedUser(user))
        })
    }
}
