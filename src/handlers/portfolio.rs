use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, RedisCache, keys};
use crate::error::AppError;
use crate::models::PaginationQuery;
use crate::models::portfolio::{CreatePortfolio, PortfolioDetail, PortfolioListItem, UpdatePortfolio};
use crate::services::portfolios as portfolio_service;

/// GET /api/portfolios — newest portfolios, paginated.
/// Query params: ?page=1&limit=20
pub async fn get_portfolios(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_config: web::Data<CacheConfig>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let cache_key = keys::portfolio_list(query.page(), query.limit());

    // Try to get from cache first
    match cache.get::<Vec<PortfolioListItem>>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {}", e),
    }

    let list = portfolio_service::get_portfolios(db.get_ref(), &query).await?;
    if let Err(e) = cache
        .set(&cache_key, &list, cache_config.portfolio_list_ttl)
        .await
    {
        tracing::warn!("Cache error: {}", e);
    }

    Ok(HttpResponse::Ok().json(list))
}

/// GET /api/portfolios/{id} — a single portfolio with price list and payment history.
pub async fn get_portfolio(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_config: web::Data<CacheConfig>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let cache_key = keys::portfolio_detail(id);

    match cache.get::<PortfolioDetail>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {}", e),
    }

    let detail = portfolio_service::get_portfolio_by_id(db.get_ref(), id).await?;
    if let Err(e) = cache
        .set(&cache_key, &detail, cache_config.portfolio_detail_ttl)
        .await
    {
        tracing::warn!("Cache error: {}", e);
    }

    Ok(HttpResponse::Ok().json(detail))
}

/// POST /api/portfolios — a planner creates their portfolio.
pub async fn create_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreatePortfolio>,
) -> Result<HttpResponse, AppError> {
    let created =
        portfolio_service::add_portfolio(db.get_ref(), user.identity(), body.into_inner()).await?;
    cache.invalidate_portfolios().await;
    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/portfolios — a planner patches their portfolio.
pub async fn update_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<UpdatePortfolio>,
) -> Result<HttpResponse, AppError> {
    let updated =
        portfolio_service::update_portfolio(db.get_ref(), user.identity(), body.into_inner())
            .await?;
    cache.invalidate_portfolios().await;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/portfolios — a planner deletes their portfolio.
pub async fn delete_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
) -> Result<HttpResponse, AppError> {
    let id = portfolio_service::delete_portfolio(db.get_ref(), user.identity()).await?;
    cache.invalidate_portfolios().await;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Portfolio {id} deleted"),
    })))
}
