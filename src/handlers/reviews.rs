use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::PaginationQuery;
use crate::models::reviews::{
    CreateReview, ReviewList, ReviewTarget, ReviewsByPlannerQuery, UpdateReview,
};
use crate::services::reviews as review_service;

/// POST /api/reviews?chatId= — a couple reviews the planner of a confirmed chat.
pub async fn add_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    target: web::Query<ReviewTarget>,
    body: web::Json<CreateReview>,
) -> Result<HttpResponse, AppError> {
    let created = review_service::add_review(
        db.get_ref(),
        user.identity(),
        target.chat_id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/reviews?plannerId=&page=&limit= — a planner's reviews.
pub async fn get_reviews_by_planner(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ReviewsByPlannerQuery>,
) -> Result<HttpResponse, AppError> {
    let page = PaginationQuery {
        page: query.page,
        limit: query.limit,
    };
    let reviews = review_service::find_by_planner(db.get_ref(), query.planner_id, &page).await?;
    Ok(HttpResponse::Ok().json(ReviewList { reviews }))
}

/// GET /api/reviews/collect — every review the calling couple wrote.
pub async fn get_my_reviews(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let reviews = review_service::find_by_couple(db.get_ref(), user.identity()).await?;
    Ok(HttpResponse::Ok().json(ReviewList { reviews }))
}

/// GET /api/reviews/{id} — one of the calling couple's own reviews.
pub async fn get_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let review = review_service::find_by_id(db.get_ref(), user.identity(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

/// PUT /api/reviews/{id} — the couple who wrote a review replaces its content.
pub async fn update_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
    body: web::Json<UpdateReview>,
) -> Result<HttpResponse, AppError> {
    let updated = review_service::update_review(
        db.get_ref(),
        user.identity(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/reviews/{id} — the couple who wrote a review deletes it.
pub async fn delete_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    review_service::delete_review(db.get_ref(), user.identity(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Review {id} deleted"),
    })))
}
