use sea_orm::*;

use crate::models::matches::{self, MatchStatus};
use crate::models::users::Role;

/// Insert a new match (defaults to Unconfirmed with no confirmed price).
pub async fn insert_match<C: ConnectionTrait>(
    db: &C,
    couple_id: i64,
    planner_id: i64,
) -> Result<matches::Model, DbErr> {
    let new_match = matches::ActiveModel {
        couple_id: Set(couple_id),
        planner_id: Set(planner_id),
        status: Set(MatchStatus::Unconfirmed),
        confirmed_price: Set(0),
        confirmed_at: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_match.insert(db).await
}

/// Fetch a single match by ID.
pub async fn get_match_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<matches::Model>, DbErr> {
    matches::Entity::find_by_id(id).one(db).await
}

/// Fetch every match the user takes part in under `role`, newest first.
pub async fn get_matches_for_participant<C: ConnectionTrait>(
    db: &C,
    role: Role,
    user_id: i64,
) -> Result<Vec<matches::Model>, DbErr> {
    let column = match role {
        Role::Planner => matches::Column::PlannerId,
        Role::Couple => matches::Column::CoupleId,
    };

    matches::Entity::find()
        .filter(column.eq(user_id))
        .order_by_desc(matches::Column::CreatedAt)
        .order_by_desc(matches::Column::Id)
        .all(db)
        .await
}

/// Mark a match confirmed at `price`.
pub async fn confirm_match<C: ConnectionTrait>(
    db: &C,
    existing: matches::Model,
    price: i64,
    confirmed_at: chrono::DateTime<chrono::Utc>,
) -> Result<matches::Model, DbErr> {
    let mut active: matches::ActiveModel = existing.into();
    active.status = Set(MatchStatus::Confirmed);
    active.confirmed_price = Set(price);
    active.confirmed_at = Set(Some(confirmed_at));

    active.update(db).await
}

/// Delete a match by ID. Its quotations go with it.
pub async fn delete_match<C: ConnectionTrait>(db: &C, id: i64) -> Result<DeleteResult, DbErr> {
    matches::Entity::delete_by_id(id).exec(db).await
}

/// Confirmed prices of every confirmed match of a planner.
pub async fn get_confirmed_prices_by_planner<C: ConnectionTrait>(
    db: &C,
    planner_id: i64,
) -> Result<Vec<i64>, DbErr> {
    let rows = matches::Entity::find()
        .filter(matches::Column::PlannerId.eq(planner_id))
        .filter(matches::Column::Status.eq(MatchStatus::Confirmed))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|m| m.confirmed_price).collect())
}

/// The planner's most recently confirmed matches.
pub async fn get_latest_confirmed_by_planner<C: ConnectionTrait>(
    db: &C,
    planner_id: i64,
    limit: u64,
) -> Result<Vec<matches::Model>, DbErr> {
    matches::Entity::find()
        .filter(matches::Column::PlannerId.eq(planner_id))
        .filter(matches::Column::Status.eq(MatchStatus::Confirmed))
        .order_by_desc(matches::Column::ConfirmedAt)
        .order_by_desc(matches::Column::Id)
        .limit(limit)
        .all(db)
        .await
}
