use sea_orm::*;

use crate::models::portfolio::{self, ConfirmedPriceStats, CreatePortfolio, UpdatePortfolio};

/// Insert a new portfolio with zeroed deal statistics.
pub async fn insert_portfolio<C: ConnectionTrait>(
    db: &C,
    planner_id: i64,
    input: &CreatePortfolio,
    total_price: i64,
) -> Result<portfolio::Model, DbErr> {
    let new_portfolio = portfolio::ActiveModel {
        planner_id: Set(planner_id),
        title: Set(input.title.clone()),
        description: Set(input.description.clone()),
        location: Set(input.location.clone()),
        career: Set(input.career.clone()),
        partner_company: Set(input.partner_company.clone()),
        total_price: Set(total_price),
        contract_count: Set(0),
        avg_price: Set(0),
        min_price: Set(0),
        max_price: Set(0),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_portfolio.insert(db).await
}

/// Fetch a single portfolio by ID.
pub async fn get_portfolio_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<portfolio::Model>, DbErr> {
    portfolio::Entity::find_by_id(id).one(db).await
}

/// Fetch the portfolio owned by a planner, if any.
pub async fn get_portfolio_by_planner<C: ConnectionTrait>(
    db: &C,
    planner_id: i64,
) -> Result<Option<portfolio::Model>, DbErr> {
    portfolio::Entity::find()
        .filter(portfolio::Column::PlannerId.eq(planner_id))
        .one(db)
        .await
}

/// Fetch one page of portfolios, newest first.
pub async fn get_portfolios_page<C: ConnectionTrait>(
    db: &C,
    offset: u64,
    limit: u64,
) -> Result<Vec<portfolio::Model>, DbErr> {
    portfolio::Entity::find()
        .order_by_desc(portfolio::Column::CreatedAt)
        .order_by_desc(portfolio::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await
}

/// Patch the descriptive fields and store the recomputed total price.
/// Deal statistics are left as they are.
pub async fn update_portfolio<C: ConnectionTrait>(
    db: &C,
    existing: portfolio::Model,
    input: UpdatePortfolio,
    total_price: i64,
) -> Result<portfolio::Model, DbErr> {
    let mut active: portfolio::ActiveModel = existing.into();

    input.title.apply(&mut active.title);
    input.description.apply(&mut active.description);
    input.location.apply(&mut active.location);
    input.career.apply(&mut active.career);
    input.partner_company.apply(&mut active.partner_company);
    active.total_price = Set(total_price);

    active.update(db).await
}

/// Overwrite the stored deal statistics.
pub async fn update_confirmed_prices<C: ConnectionTrait>(
    db: &C,
    existing: portfolio::Model,
    stats: ConfirmedPriceStats,
) -> Result<portfolio::Model, DbErr> {
    let mut active: portfolio::ActiveModel = existing.into();
    active.contract_count = Set(stats.contract_count);
    active.avg_price = Set(stats.avg_price);
    active.min_price = Set(stats.min_price);
    active.max_price = Set(stats.max_price);

    active.update(db).await
}

/// Delete a portfolio by ID.
pub async fn delete_portfolio<C: ConnectionTrait>(db: &C, id: i64) -> Result<DeleteResult, DbErr> {
    portfolio::Entity::delete_by_id(id).exec(db).await
}
