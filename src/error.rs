use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

pub const PERMISSION_DENIED: &str = "You do not have permission to access this resource";
pub const NO_QUOTATION_TO_CONFIRM: &str = "There are no quotations to confirm";
pub const QUOTATIONS_NOT_ALL_CONFIRMED: &str = "Not all quotations have been confirmed";
pub const MUST_CONFIRM_BEFORE_DELETE: &str =
    "All quotations must be confirmed before deleting the chat";
pub const PORTFOLIO_ALREADY_EXISTS: &str = "A portfolio already exists for this planner";
pub const PRICE_OUT_OF_RANGE: &str = "price total out of range";
pub const NEGATIVE_PRICE: &str = "Prices must not be negative";

/// Every failure a service or handler can report.
///
/// Each variant maps to a fixed HTTP status, and none of them are fatal:
/// they describe invalid input or invalid state for a single request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl AppError {
    pub fn permission_denied() -> Self {
        Self::PermissionDenied(PERMISSION_DENIED.to_string())
    }

    pub fn match_not_found(id: i64) -> Self {
        Self::NotFound(format!("Match {id} not found"))
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound(format!("User {id} not found"))
    }

    pub fn quotation_not_found(id: i64) -> Self {
        Self::NotFound(format!("Quotation {id} not found"))
    }

    pub fn portfolio_not_found() -> Self {
        Self::NotFound("Portfolio not found".to_string())
    }

    pub fn review_not_found(id: i64) -> Self {
        Self::NotFound(format!("Review {id} has been deleted or does not exist"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Database(e) = self {
            tracing::error!("Database error: {e}");
        }

        let status = self.status_code();
        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            AppError::match_not_found(3).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation(NO_QUOTATION_TO_CONFIRM.to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::permission_denied().status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Database(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(AppError::match_not_found(7).to_string(), "Match 7 not found");
        assert_eq!(
            AppError::review_not_found(10).to_string(),
            "Review 10 has been deleted or does not exist"
        );
    }
}
