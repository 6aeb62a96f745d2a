use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::RedisCache;
use crate::error::AppError;
use crate::models::matches::{AddMatch, MatchResponse};
use crate::services::matches as match_service;

/// POST /api/chats — a couple opens a chat with a planner.
pub async fn add_chat(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<AddMatch>,
) -> Result<HttpResponse, AppError> {
    let created = match_service::add_chat(db.get_ref(), user.identity(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(MatchResponse::from(created)))
}

/// GET /api/chats — chats the authenticated user takes part in.
pub async fn list_chats(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let chats = match_service::list_chats(db.get_ref(), user.identity()).await?;
    Ok(HttpResponse::Ok().json(chats))
}

/// POST /api/chats/{id}/confirm — confirm the whole match once every quotation is confirmed.
///
/// Confirmation refreshes the planner's portfolio statistics, so cached
/// portfolio pages are dropped afterwards.
pub async fn confirm_all(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let confirmed =
        match_service::confirm_all(db.get_ref(), user.identity(), path.into_inner()).await?;
    cache.invalidate_portfolios().await;
    Ok(HttpResponse::Ok().json(MatchResponse::from(confirmed)))
}

/// DELETE /api/chats/{id} — delete a chat that is confirmed or has no quotations.
pub async fn delete_chat(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    match_service::delete_chat(db.get_ref(), user.identity(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Chat {id} deleted"),
    })))
}
