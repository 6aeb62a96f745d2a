use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `reviews` table.
///
/// `match_id` becomes NULL when the chat the review was written for is deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub couple_id: i64,
    pub planner_id: i64,
    pub match_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CoupleId",
        to = "super::users::Column::Id"
    )]
    Couple,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PlannerId",
        to = "super::users::Column::Id"
    )]
    Planner,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReview {
    pub content: String,
}

/// Query string for `POST /api/reviews?chatId=`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTarget {
    pub chat_id: i64,
}

/// Query string for `GET /api/reviews?plannerId=&page=&limit=`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsByPlannerQuery {
    pub planner_id: i64,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub couple_id: i64,
    pub planner_id: i64,
    pub planner_name: String,
    pub content: String,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl ReviewResponse {
    pub fn new(review: Model, planner_name: String) -> Self {
        Self {
            id: review.id,
            couple_id: review.couple_id,
            planner_id: review.planner_id,
            planner_name,
            content: review.content,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewList {
    pub reviews: Vec<ReviewResponse>,
}
