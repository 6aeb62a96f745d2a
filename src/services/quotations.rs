use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::auth::authorization::{Identity, check_participant, require_role};
use crate::db::quotations as quotation_db;
use crate::error::AppError;
use crate::models::matches;
use crate::models::quotations::{
    self, CreateQuotation, QuotationResponse, QuotationStatus, QuotationsByMatch, UpdateQuotation,
};
use crate::models::Patch;
use crate::models::users::Role;
use crate::pricing;
use crate::services::begin_read_only;
use crate::services::matches::find_match;

/// Load a quotation and its match, checking the caller is the match's planner.
async fn find_for_planner<C: ConnectionTrait>(
    conn: &C,
    identity: Identity,
    quotation_id: i64,
) -> Result<(quotations::Model, matches::Model), AppError> {
    require_role(identity, Role::Planner)?;

    let quotation = quotation_db::get_quotation_by_id(conn, quotation_id)
        .await?
        .ok_or_else(|| AppError::quotation_not_found(quotation_id))?;
    let chat = find_match(conn, quotation.match_id).await?;
    check_participant(identity, &chat)?;

    Ok((quotation, chat))
}

fn ensure_pending(quotation: &quotations::Model) -> Result<(), AppError> {
    if quotation.status != QuotationStatus::Pending {
        return Err(AppError::Validation(format!(
            "Quotation {} is already confirmed",
            quotation.id
        )));
    }
    Ok(())
}

/// The match's planner proposes a new line item.
pub async fn add_quotation(
    db: &DatabaseConnection,
    identity: Identity,
    match_id: i64,
    input: CreateQuotation,
) -> Result<quotations::Model, AppError> {
    require_role(identity, Role::Planner)?;
    pricing::ensure_price(input.price)?;

    let txn = db.begin().await?;

    let chat = find_match(&txn, match_id).await?;
    check_participant(identity, &chat)?;
    if chat.is_confirmed() {
        return Err(AppError::Validation(
            "Quotations cannot be added to a confirmed match".to_string(),
        ));
    }

    let created = quotation_db::insert_quotation(&txn, chat.id, input).await?;
    txn.commit().await?;

    info!(quotation_id = created.id, match_id, "Quotation added");
    Ok(created)
}

/// All quotations of a match with their total and confirmed-only sums.
pub async fn find_by_match(
    db: &DatabaseConnection,
    identity: Identity,
    match_id: i64,
) -> Result<QuotationsByMatch, AppError> {
    let txn = begin_read_only(db).await?;

    let chat = find_match(&txn, match_id).await?;
    check_participant(identity, &chat)?;
    let quotations = quotation_db::get_quotations_by_match(&txn, chat.id).await?;

    txn.commit().await?;

    Ok(QuotationsByMatch {
        status: chat.status,
        total_price: pricing::quotation_total(&quotations)?,
        confirmed_price: pricing::confirmed_quotation_total(&quotations)?,
        quotations: quotations.into_iter().map(QuotationResponse::from).collect(),
    })
}

/// Edit a pending quotation.
pub async fn update_quotation(
    db: &DatabaseConnection,
    identity: Identity,
    quotation_id: i64,
    input: UpdateQuotation,
) -> Result<quotations::Model, AppError> {
    if let Patch::Set(price) = &input.price {
        pricing::ensure_price(*price)?;
    }

    let txn = db.begin().await?;

    let (quotation, _) = find_for_planner(&txn, identity, quotation_id).await?;
    ensure_pending(&quotation)?;

    let updated = quotation_db::update_quotation(&txn, quotation, input).await?;
    txn.commit().await?;

    Ok(updated)
}

/// Mark a single pending quotation confirmed.
pub async fn confirm_quotation(
    db: &DatabaseConnection,
    identity: Identity,
    quotation_id: i64,
) -> Result<quotations::Model, AppError> {
    let txn = db.begin().await?;

    let (quotation, _) = find_for_planner(&txn, identity, quotation_id).await?;
    ensure_pending(&quotation)?;

    let confirmed = quotation_db::confirm_quotation(&txn, quotation).await?;
    txn.commit().await?;

    info!(quotation_id, match_id = confirmed.match_id, "Quotation confirmed");
    Ok(confirmed)
}
