use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;

/// SeaORM entity for the `portfolios` table.
///
/// `total_price` is the sum of the portfolio's price items. The confirmed-deal
/// statistics (`contract_count`, `avg_price`, `min_price`, `max_price`) are a
/// stored copy of figures derived from the planner's confirmed matches and are
/// only refreshed by the match confirmation workflow.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub planner_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub career: String,
    #[sea_orm(column_type = "Text")]
    pub partner_company: String,
    pub total_price: i64,
    pub contract_count: i64,
    pub avg_price: i64,
    pub min_price: i64,
    pub max_price: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PlannerId",
        to = "super::users::Column::Id"
    )]
    Planner,
    #[sea_orm(has_many = "super::price_items::Entity")]
    PriceItems,
    #[sea_orm(has_many = "super::image_items::Entity")]
    ImageItems,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planner.def()
    }
}

impl Related<super::price_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PriceItems.def()
    }
}

impl Related<super::image_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ImageItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceItemInput {
    pub item_title: String,
    pub item_price: i64,
}

/// Request body for `POST /api/portfolios`.
///
/// `images` are base64 strings (optionally `data:` URLs); the first one is the thumbnail.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePortfolio {
    pub title: String,
    pub description: String,
    pub location: String,
    pub career: String,
    pub partner_company: String,
    pub items: Vec<PriceItemInput>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Request body for `PUT /api/portfolios`.
///
/// Descriptive fields are patched individually. `items` always replaces the
/// whole price list, and `images` replaces all images when present.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePortfolio {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub location: Patch<String>,
    #[serde(default)]
    pub career: Patch<String>,
    #[serde(default)]
    pub partner_company: Patch<String>,
    pub items: Vec<PriceItemInput>,
    #[serde(default)]
    pub images: Patch<Vec<String>>,
}

/// Recomputed confirmed-deal figures for a planner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedPriceStats {
    pub contract_count: i64,
    pub avg_price: i64,
    pub min_price: i64,
    pub max_price: i64,
}

/// One entry of `GET /api/portfolios`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioListItem {
    pub id: i64,
    pub image: Option<String>,
    pub title: String,
    pub planner_name: String,
    pub price: i64,
    pub location: String,
    pub contract_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceInfo {
    pub total_price: i64,
    pub items: Vec<PriceItemInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentItem {
    pub payment_title: String,
    pub payment_price: i64,
    pub payment_company: String,
    pub payment_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub price: i64,
    pub confirmed_at: Option<DateTimeUtc>,
    pub payment_items: Vec<PaymentItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentHistory {
    pub avg_price: i64,
    pub min_price: i64,
    pub max_price: i64,
    pub payments: Vec<Payment>,
}

/// Response for `GET /api/portfolios/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioDetail {
    pub id: i64,
    pub planner_id: i64,
    pub images: Vec<String>,
    pub title: String,
    pub planner_name: String,
    pub contract_count: i64,
    pub price_info: PriceInfo,
    pub location: String,
    pub description: String,
    pub career: String,
    pub partner_company: String,
    pub payments_history: PaymentHistory,
}
