use sea_orm::*;

use crate::models::image_items;

/// Insert the images of a portfolio. The first image becomes the thumbnail.
pub async fn insert_images<C: ConnectionTrait>(
    db: &C,
    portfolio_id: i64,
    images: Vec<Vec<u8>>,
) -> Result<(), DbErr> {
    if images.is_empty() {
        return Ok(());
    }

    let now = chrono::Utc::now();
    let rows = images
        .into_iter()
        .enumerate()
        .map(|(i, data)| image_items::ActiveModel {
            portfolio_id: Set(portfolio_id),
            data: Set(data),
            thumbnail: Set(i == 0),
            created_at: Set(now),
            ..Default::default()
        });

    image_items::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

/// Fetch every image of a portfolio in insertion order.
pub async fn get_images_by_portfolio<C: ConnectionTrait>(
    db: &C,
    portfolio_id: i64,
) -> Result<Vec<image_items::Model>, DbErr> {
    image_items::Entity::find()
        .filter(image_items::Column::PortfolioId.eq(portfolio_id))
        .order_by_asc(image_items::Column::Id)
        .all(db)
        .await
}

/// Fetch the thumbnails of many portfolios in one query.
pub async fn get_thumbnails<C: ConnectionTrait>(
    db: &C,
    portfolio_ids: Vec<i64>,
) -> Result<Vec<image_items::Model>, DbErr> {
    if portfolio_ids.is_empty() {
        return Ok(Vec::new());
    }

    image_items::Entity::find()
        .filter(image_items::Column::PortfolioId.is_in(portfolio_ids))
        .filter(image_items::Column::Thumbnail.eq(true))
        .all(db)
        .await
}

/// Delete every image of a portfolio.
pub async fn delete_images_by_portfolio<C: ConnectionTrait>(
    db: &C,
    portfolio_id: i64,
) -> Result<u64, DbErr> {
    let result = image_items::Entity::delete_many()
        .filter(image_items::Column::PortfolioId.eq(portfolio_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
