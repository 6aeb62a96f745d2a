use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::portfolio::PriceItemInput;

/// SeaORM entity for the `price_items` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub portfolio_id: i64,
    pub item_title: String,
    pub item_price: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::portfolio::Entity",
        from = "Column::PortfolioId",
        to = "super::portfolio::Column::Id"
    )]
    Portfolio,
}

impl Related<super::portfolio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portfolio.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PriceItemInput {
    fn from(m: Model) -> Self {
        Self {
            item_title: m.item_title,
            item_price: m.item_price,
        }
    }
}
