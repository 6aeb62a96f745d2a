use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::auth::authorization::{Identity, check_participant, require_role};
use crate::db::reviews as review_db;
use crate::db::users as user_db;
use crate::error::{AppError, QUOTATIONS_NOT_ALL_CONFIRMED};
use crate::models::reviews::{self, CreateReview, ReviewResponse, UpdateReview};
use crate::models::users::Role;
use crate::models::PaginationQuery;
use crate::services::begin_read_only;
use crate::services::matches::find_match;

/// Load a review the calling couple wrote.
async fn find_own_review<C: ConnectionTrait>(
    conn: &C,
    identity: Identity,
    review_id: i64,
) -> Result<reviews::Model, AppError> {
    require_role(identity, Role::Couple)?;

    let review = review_db::get_review_by_id(conn, review_id)
        .await?
        .ok_or_else(|| AppError::review_not_found(review_id))?;
    check_participant(identity, &review)?;

    Ok(review)
}

async fn with_planner_names<C: ConnectionTrait>(
    conn: &C,
    list: Vec<reviews::Model>,
) -> Result<Vec<ReviewResponse>, AppError> {
    let names = user_db::get_names_by_ids(conn, list.iter().map(|r| r.planner_id).collect()).await?;

    Ok(list
        .into_iter()
        .map(|r| {
            let name = names.get(&r.planner_id).cloned().unwrap_or_default();
            ReviewResponse::new(r, name)
        })
        .collect())
}

/// A couple reviews the planner of one of their confirmed matches.
pub async fn add_review(
    db: &DatabaseConnection,
    identity: Identity,
    match_id: i64,
    input: CreateReview,
) -> Result<reviews::Model, AppError> {
    let txn = db.begin().await?;

    let chat = find_match(&txn, match_id).await?;
    check_participant(identity, &chat)?;
    require_role(identity, Role::Couple)?;

    if !chat.is_confirmed() {
        return Err(AppError::Validation(
            QUOTATIONS_NOT_ALL_CONFIRMED.to_string(),
        ));
    }

    let created = review_db::insert_review(&txn, &chat, input.content).await?;
    txn.commit().await?;

    info!(review_id = created.id, match_id, "Review added");
    Ok(created)
}

/// One page of reviews for a planner, newest first.
pub async fn find_by_planner(
    db: &DatabaseConnection,
    planner_id: i64,
    page: &PaginationQuery,
) -> Result<Vec<ReviewResponse>, AppError> {
    let txn = begin_read_only(db).await?;

    user_db::get_user_with_role(&txn, planner_id, Role::Planner)
        .await?
        .ok_or_else(|| AppError::user_not_found(planner_id))?;
    let list =
        review_db::get_reviews_by_planner(&txn, planner_id, page.offset(), page.limit()).await?;
    let out = with_planner_names(&txn, list).await?;

    txn.commit().await?;
    Ok(out)
}

/// Every review the calling couple has written.
pub async fn find_by_couple(
    db: &DatabaseConnection,
    identity: Identity,
) -> Result<Vec<ReviewResponse>, AppError> {
    require_role(identity, Role::Couple)?;

    let txn = begin_read_only(db).await?;
    let list = review_db::get_reviews_by_couple(&txn, identity.id).await?;
    let out = with_planner_names(&txn, list).await?;
    txn.commit().await?;

    Ok(out)
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    identity: Identity,
    review_id: i64,
) -> Result<ReviewResponse, AppError> {
    let txn = begin_read_only(db).await?;

    let review = find_own_review(&txn, identity, review_id).await?;
    let mut out = with_planner_names(&txn, vec![review]).await?;

    txn.commit().await?;
    out.pop()
        .ok_or_else(|| AppError::review_not_found(review_id))
}

pub async fn update_review(
    db: &DatabaseConnection,
    identity: Identity,
    review_id: i64,
    input: UpdateReview,
) -> Result<reviews::Model, AppError> {
    let txn = db.begin().await?;

    let review = find_own_review(&txn, identity, review_id).await?;
    let updated = review_db::update_review_content(&txn, review, input.content).await?;

    txn.commit().await?;
    Ok(updated)
}

pub async fn delete_review(
    db: &DatabaseConnection,
    identity: Identity,
    review_id: i64,
) -> Result<(), AppError> {
    let txn = db.begin().await?;

    let review = find_own_review(&txn, identity, review_id).await?;
    review_db::delete_review(&txn, review.id).await?;

    txn.commit().await?;

    info!(review_id, "Review deleted");
    Ok(())
}
