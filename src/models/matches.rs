use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Match status stored as a lowercase string in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[sea_orm(string_value = "unconfirmed")]
    Unconfirmed,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
}

/// SeaORM entity for the `matches` table: one chat between a couple and a planner.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub couple_id: i64,
    pub planner_id: i64,
    pub status: MatchStatus,
    pub confirmed_price: i64,
    pub confirmed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quotations::Entity")]
    Quotations,
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

impl Related<super::quotations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quotations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_confirmed(&self) -> bool {
        self.status == MatchStatus::Confirmed
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct AddMatch {
    pub planner_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub id: i64,
    pub couple_id: i64,
    pub planner_id: i64,
    pub status: MatchStatus,
    pub confirmed_price: i64,
    pub confirmed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

impl From<Model> for MatchResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            couple_id: m.couple_id,
            planner_id: m.planner_id,
            status: m.status,
            confirmed_price: m.confirmed_price,
            confirmed_at: m.confirmed_at,
            created_at: m.created_at,
        }
    }
}
