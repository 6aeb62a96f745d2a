use sea_orm::*;
use std::collections::HashMap;

use crate::models::users::{self, CreateUserFromAuth, Role};

/// Return the user named by the token, creating the row on first sight.
pub async fn find_or_create_from_auth<C: ConnectionTrait>(
    db: &C,
    input: CreateUserFromAuth,
) -> Result<users::Model, DbErr> {
    if let Some(existing) = users::Entity::find_by_id(input.id).one(db).await? {
        return Ok(existing);
    }

    let new_user = users::ActiveModel {
        id: Set(input.id),
        email: Set(input.email),
        name: Set(input.name),
        role: Set(input.role),
        created_at: Set(chrono::Utc::now()),
    };

    new_user.insert(db).await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Fetch a user by ID only if they hold `role`.
pub async fn get_user_with_role<C: ConnectionTrait>(
    db: &C,
    id: i64,
    role: Role,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id)
        .filter(users::Column::Role.eq(role))
        .one(db)
        .await
}

/// Look up display names for many users in one query.
pub async fn get_names_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i64>,
) -> Result<HashMap<i64, String>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|u| (u.id, u.name)).collect())
}
