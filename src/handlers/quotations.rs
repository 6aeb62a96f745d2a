use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::quotations::{CreateQuotation, QuotationResponse, UpdateQuotation};
use crate::services::quotations as quotation_service;

/// POST /api/chats/{id}/quotations — the chat's planner adds a quotation.
pub async fn add_quotation(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
    body: web::Json<CreateQuotation>,
) -> Result<HttpResponse, AppError> {
    let created = quotation_service::add_quotation(
        db.get_ref(),
        user.identity(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(QuotationResponse::from(created)))
}

/// GET /api/chats/{id}/quotations — quotations of a chat with price totals.
pub async fn get_quotations(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let found =
        quotation_service::find_by_match(db.get_ref(), user.identity(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// PUT /api/quotations/{id} — edit a pending quotation.
pub async fn update_quotation(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
    body: web::Json<UpdateQuotation>,
) -> Result<HttpResponse, AppError> {
    let updated = quotation_service::update_quotation(
        db.get_ref(),
        user.identity(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(QuotationResponse::from(updated)))
}

/// POST /api/quotations/{id}/confirm — the planner confirms one quotation.
pub async fn confirm_quotation(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let confirmed =
        quotation_service::confirm_quotation(db.get_ref(), user.identity(), path.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(QuotationResponse::from(confirmed)))
}
