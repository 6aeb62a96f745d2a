use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::matches::MatchStatus;
use super::Patch;

/// Quotation status stored as a lowercase string in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
}

/// SeaORM entity for the `quotations` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub match_id: i64,
    pub title: String,
    pub price: i64,
    pub company: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: QuotationStatus,
    pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_confirmed(&self) -> bool {
        self.status == QuotationStatus::Confirmed
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuotation {
    pub title: String,
    pub price: i64,
    pub company: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuotation {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub price: Patch<i64>,
    #[serde(default)]
    pub company: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotationResponse {
    pub id: i64,
    pub title: String,
    pub price: i64,
    pub company: String,
    pub description: String,
    pub status: QuotationStatus,
    pub modified_at: DateTimeUtc,
}

impl From<Model> for QuotationResponse {
    fn from(q: Model) -> Self {
        Self {
            id: q.id,
            title: q.title,
            price: q.price,
            company: q.company,
            description: q.description,
            status: q.status,
            modified_at: q.modified_at,
        }
    }
}

/// Response for `GET /api/chats/{id}/quotations`.
#[derive(Debug, Clone, Serialize)]
pub struct QuotationsByMatch {
    pub status: MatchStatus,
    pub total_price: i64,
    pub confirmed_price: i64,
    pub quotations: Vec<QuotationResponse>,
}
