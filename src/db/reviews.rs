use sea_orm::*;

use crate::models::matches;
use crate::models::reviews;

/// Insert a review for a confirmed match.
pub async fn insert_review<C: ConnectionTrait>(
    db: &C,
    confirmed_match: &matches::Model,
    content: String,
) -> Result<reviews::Model, DbErr> {
    let new_review = reviews::ActiveModel {
        couple_id: Set(confirmed_match.couple_id),
        planner_id: Set(confirmed_match.planner_id),
        match_id: Set(Some(confirmed_match.id)),
        content: Set(content),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    new_review.insert(db).await
}

/// Fetch a single review by ID.
pub async fn get_review_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<reviews::Model>, DbErr> {
    reviews::Entity::find_by_id(id).one(db).await
}

/// Fetch one page of a planner's reviews, newest first.
pub async fn get_reviews_by_planner<C: ConnectionTrait>(
    db: &C,
    planner_id: i64,
    offset: u64,
    limit: u64,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::PlannerId.eq(planner_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .order_by_desc(reviews::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await
}

/// Fetch every review written by a couple, newest first.
pub async fn get_reviews_by_couple<C: ConnectionTrait>(
    db: &C,
    couple_id: i64,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::CoupleId.eq(couple_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .order_by_desc(reviews::Column::Id)
        .all(db)
        .await
}

/// Replace the content of a review.
pub async fn update_review_content<C: ConnectionTrait>(
    db: &C,
    existing: reviews::Model,
    content: String,
) -> Result<reviews::Model, DbErr> {
    let mut active: reviews::ActiveModel = existing.into();
    active.content = Set(content);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a review by ID.
pub async fn delete_review<C: ConnectionTrait>(db: &C, id: i64) -> Result<DeleteResult, DbErr> {
    reviews::Entity::delete_by_id(id).exec(db).await
}
