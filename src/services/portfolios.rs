use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::HashMap;
use tracing::info;

use crate::auth::authorization::{Identity, require_role};
use crate::db::image_items as image_db;
use crate::db::matches as match_db;
use crate::db::portfolio as portfolio_db;
use crate::db::price_items as price_db;
use crate::db::quotations as quotation_db;
use crate::db::users as user_db;
use crate::error::{AppError, PORTFOLIO_ALREADY_EXISTS};
use crate::images;
use crate::models::portfolio::{
    self, ConfirmedPriceStats, CreatePortfolio, Payment, PaymentHistory, PaymentItem,
    PortfolioDetail, PortfolioListItem, PriceInfo, PriceItemInput, UpdatePortfolio,
};
use crate::models::users::Role;
use crate::models::{PaginationQuery, Patch, quotations};
use crate::pricing;
use crate::services::begin_read_only;

/// How many confirmed deals a portfolio page shows as payment history.
const PAYMENT_HISTORY_LEN: u64 = 10;

async fn find_planner_portfolio<C: ConnectionTrait>(
    conn: &C,
    planner_id: i64,
) -> Result<portfolio::Model, AppError> {
    portfolio_db::get_portfolio_by_planner(conn, planner_id)
        .await?
        .ok_or_else(AppError::portfolio_not_found)
}

/// Create the caller's portfolio. A planner owns at most one.
pub async fn add_portfolio(
    db: &DatabaseConnection,
    identity: Identity,
    input: CreatePortfolio,
) -> Result<portfolio::Model, AppError> {
    require_role(identity, Role::Planner)?;
    pricing::ensure_non_negative(&input.items)?;
    let total_price = pricing::portfolio_total(&input.items)?;
    let images = images::decode_all(&input.images)?;

    let txn = db.begin().await?;

    user_db::get_user_with_role(&txn, identity.id, Role::Planner)
        .await?
        .ok_or_else(|| AppError::user_not_found(identity.id))?;

    if portfolio_db::get_portfolio_by_planner(&txn, identity.id)
        .await?
        .is_some()
    {
        return Err(AppError::Validation(PORTFOLIO_ALREADY_EXISTS.to_string()));
    }

    let created = portfolio_db::insert_portfolio(&txn, identity.id, &input, total_price).await?;
    price_db::insert_price_items(&txn, created.id, &input.items).await?;
    image_db::insert_images(&txn, created.id, images).await?;

    txn.commit().await?;

    info!(
        portfolio_id = created.id,
        planner_id = identity.id,
        total_price,
        "Portfolio created"
    );
    Ok(created)
}

/// One page of portfolios, newest first, each with its thumbnail.
pub async fn get_portfolios(
    db: &DatabaseConnection,
    query: &PaginationQuery,
) -> Result<Vec<PortfolioListItem>, AppError> {
    let txn = begin_read_only(db).await?;

    let portfolios = portfolio_db::get_portfolios_page(&txn, query.offset(), query.limit()).await?;
    let ids = portfolios.iter().map(|p| p.id).collect();
    let planner_ids = portfolios.iter().map(|p| p.planner_id).collect();

    let thumbnails: HashMap<i64, String> = image_db::get_thumbnails(&txn, ids)
        .await?
        .iter()
        .map(|img| (img.portfolio_id, images::encode(img)))
        .collect();
    let names = user_db::get_names_by_ids(&txn, planner_ids).await?;

    txn.commit().await?;

    Ok(portfolios
        .into_iter()
        .map(|p| PortfolioListItem {
            id: p.id,
            image: thumbnails.get(&p.id).cloned(),
            title: p.title,
            planner_name: names.get(&p.planner_id).cloned().unwrap_or_default(),
            price: p.total_price,
            location: p.location,
            contract_count: p.contract_count,
        })
        .collect())
}

fn payment_items(quotations: &[quotations::Model], match_id: i64) -> Vec<PaymentItem> {
    quotations
        .iter()
        .filter(|q| q.match_id == match_id)
        .map(|q| PaymentItem {
            payment_title: q.title.clone(),
            payment_price: q.price,
            payment_company: q.company.clone(),
            payment_description: q.description.clone(),
        })
        .collect()
}

/// Full portfolio page: images, price list and recent confirmed deals.
pub async fn get_portfolio_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<PortfolioDetail, AppError> {
    let txn = begin_read_only(db).await?;

    let portfolio = portfolio_db::get_portfolio_by_id(&txn, id)
        .await?
        .ok_or_else(AppError::portfolio_not_found)?;
    let planner = user_db::get_user_by_id(&txn, portfolio.planner_id)
        .await?
        .ok_or_else(|| AppError::user_not_found(portfolio.planner_id))?;

    let images: Vec<String> = image_db::get_images_by_portfolio(&txn, id)
        .await?
        .iter()
        .map(images::encode)
        .collect();
    let items: Vec<PriceItemInput> = price_db::get_price_items_by_portfolio(&txn, id)
        .await?
        .into_iter()
        .map(PriceItemInput::from)
        .collect();

    let deals =
        match_db::get_latest_confirmed_by_planner(&txn, planner.id, PAYMENT_HISTORY_LEN).await?;
    let deal_quotations =
        quotation_db::get_quotations_by_matches(&txn, deals.iter().map(|m| m.id).collect())
            .await?;

    txn.commit().await?;

    let payments = deals
        .iter()
        .map(|m| Payment {
            price: m.confirmed_price,
            confirmed_at: m.confirmed_at,
            payment_items: payment_items(&deal_quotations, m.id),
        })
        .collect();

    Ok(PortfolioDetail {
        id: portfolio.id,
        planner_id: planner.id,
        images,
        title: portfolio.title,
        planner_name: planner.name,
        contract_count: portfolio.contract_count,
        price_info: PriceInfo {
            total_price: portfolio.total_price,
            items,
        },
        location: portfolio.location,
        description: portfolio.description,
        career: portfolio.career,
        partner_company: portfolio.partner_company,
        payments_history: PaymentHistory {
            avg_price: portfolio.avg_price,
            min_price: portfolio.min_price,
            max_price: portfolio.max_price,
            payments,
        },
    })
}

/// Patch the caller's portfolio.
///
/// Unset descriptive fields keep their stored value. The price list is
/// always replaced by `items` and the total recomputed from it; images are
/// replaced only when supplied.
pub async fn update_portfolio(
    db: &DatabaseConnection,
    identity: Identity,
    mut input: UpdatePortfolio,
) -> Result<portfolio::Model, AppError> {
    require_role(identity, Role::Planner)?;
    pricing::ensure_non_negative(&input.items)?;
    let total_price = pricing::portfolio_total(&input.items)?;
    let images = match std::mem::take(&mut input.images) {
        Patch::Set(encoded) => Some(images::decode_all(&encoded)?),
        Patch::Unchanged => None,
    };

    let txn = db.begin().await?;

    user_db::get_user_with_role(&txn, identity.id, Role::Planner)
        .await?
        .ok_or_else(|| AppError::user_not_found(identity.id))?;
    let existing = find_planner_portfolio(&txn, identity.id).await?;

    let items = std::mem::take(&mut input.items);
    let updated = portfolio_db::update_portfolio(&txn, existing, input, total_price).await?;
    price_db::replace_price_items(&txn, updated.id, &items).await?;

    if let Some(images) = images {
        image_db::delete_images_by_portfolio(&txn, updated.id).await?;
        image_db::insert_images(&txn, updated.id, images).await?;
    }

    txn.commit().await?;

    info!(portfolio_id = updated.id, total_price, "Portfolio updated");
    Ok(updated)
}

/// Overwrite a planner's stored deal statistics with freshly computed figures.
///
/// Runs on the caller's connection so it joins the caller's transaction.
pub async fn update_confirmed_prices<C: ConnectionTrait>(
    conn: &C,
    planner_id: i64,
    stats: ConfirmedPriceStats,
) -> Result<portfolio::Model, AppError> {
    let existing = find_planner_portfolio(conn, planner_id).await?;
    store_confirmed_prices(conn, existing, stats).await
}

/// Write recomputed statistics onto an already loaded portfolio.
pub(crate) async fn store_confirmed_prices<C: ConnectionTrait>(
    conn: &C,
    existing: portfolio::Model,
    stats: ConfirmedPriceStats,
) -> Result<portfolio::Model, AppError> {
    let updated = portfolio_db::update_confirmed_prices(conn, existing, stats).await?;

    info!(
        portfolio_id = updated.id,
        contract_count = stats.contract_count,
        "Portfolio statistics refreshed"
    );
    Ok(updated)
}

/// Delete the caller's portfolio with its price items and images.
/// Returns the deleted portfolio's id.
pub async fn delete_portfolio(
    db: &DatabaseConnection,
    identity: Identity,
) -> Result<i64, AppError> {
    require_role(identity, Role::Planner)?;

    let txn = db.begin().await?;

    let existing = find_planner_portfolio(&txn, identity.id).await?;
    price_db::delete_price_items_by_portfolio(&txn, existing.id).await?;
    image_db::delete_images_by_portfolio(&txn, existing.id).await?;
    portfolio_db::delete_portfolio(&txn, existing.id).await?;

    txn.commit().await?;

    info!(portfolio_id = existing.id, "Portfolio deleted");
    Ok(existing.id)
}
