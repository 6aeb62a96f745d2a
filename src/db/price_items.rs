use sea_orm::*;

use crate::models::portfolio::PriceItemInput;
use crate::models::price_items;

/// Insert the price items of a portfolio.
pub async fn insert_price_items<C: ConnectionTrait>(
    db: &C,
    portfolio_id: i64,
    items: &[PriceItemInput],
) -> Result<(), DbErr> {
    if items.is_empty() {
        return Ok(());
    }

    let rows = items.iter().map(|item| price_items::ActiveModel {
        portfolio_id: Set(portfolio_id),
        item_title: Set(item.item_title.clone()),
        item_price: Set(item.item_price),
        ..Default::default()
    });

    price_items::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

/// Fetch the price items of a portfolio in insertion order.
pub async fn get_price_items_by_portfolio<C: ConnectionTrait>(
    db: &C,
    portfolio_id: i64,
) -> Result<Vec<price_items::Model>, DbErr> {
    price_items::Entity::find()
        .filter(price_items::Column::PortfolioId.eq(portfolio_id))
        .order_by_asc(price_items::Column::Id)
        .all(db)
        .await
}

/// Delete every price item of a portfolio.
pub async fn delete_price_items_by_portfolio<C: ConnectionTrait>(
    db: &C,
    portfolio_id: i64,
) -> Result<u64, DbErr> {
    let result = price_items::Entity::delete_many()
        .filter(price_items::Column::PortfolioId.eq(portfolio_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Replace the whole price list of a portfolio.
pub async fn replace_price_items<C: ConnectionTrait>(
    db: &C,
    portfolio_id: i64,
    items: &[PriceItemInput],
) -> Result<(), DbErr> {
    delete_price_items_by_portfolio(db, portfolio_id).await?;
    insert_price_items(db, portfolio_id, items).await
}
