use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::auth::authorization::{Identity, check_participant, require_role};
use crate::db::matches as match_db;
use crate::db::portfolio as portfolio_db;
use crate::db::quotations as quotation_db;
use crate::db::users as user_db;
use crate::error::{
    AppError, MUST_CONFIRM_BEFORE_DELETE, NO_QUOTATION_TO_CONFIRM, QUOTATIONS_NOT_ALL_CONFIRMED,
};
use crate::models::matches::{self, AddMatch, MatchResponse, MatchStatus};
use crate::models::quotations;
use crate::models::users::Role;
use crate::pricing;
use crate::services::{begin_read_only, portfolios};

/// Decide whether a match may be confirmed and, if so, at what price.
///
/// The price is the sum over every quotation; it is only produced when all
/// of them are confirmed.
pub fn evaluate_confirmation(quotations: &[quotations::Model]) -> Result<i64, AppError> {
    if quotations.is_empty() {
        return Err(AppError::Validation(NO_QUOTATION_TO_CONFIRM.to_string()));
    }

    if !quotations.iter().all(|q| q.is_confirmed()) {
        return Err(AppError::Validation(
            QUOTATIONS_NOT_ALL_CONFIRMED.to_string(),
        ));
    }

    pricing::quotation_total(quotations)
}

/// A chat can be deleted once it is confirmed, or if it never had a quotation.
pub fn ensure_deletable(chat: &matches::Model, has_quotations: bool) -> Result<(), AppError> {
    if has_quotations && chat.status == MatchStatus::Unconfirmed {
        return Err(AppError::Validation(MUST_CONFIRM_BEFORE_DELETE.to_string()));
    }
    Ok(())
}

pub(crate) async fn find_match<C: ConnectionTrait>(
    conn: &C,
    match_id: i64,
) -> Result<matches::Model, AppError> {
    match_db::get_match_by_id(conn, match_id)
        .await?
        .ok_or_else(|| AppError::match_not_found(match_id))
}

/// A couple opens a chat with a planner.
pub async fn add_chat(
    db: &DatabaseConnection,
    identity: Identity,
    input: AddMatch,
) -> Result<matches::Model, AppError> {
    require_role(identity, Role::Couple)?;

    let txn = db.begin().await?;

    user_db::get_user_with_role(&txn, identity.id, Role::Couple)
        .await?
        .ok_or_else(|| AppError::user_not_found(identity.id))?;
    user_db::get_user_with_role(&txn, input.planner_id, Role::Planner)
        .await?
        .ok_or_else(|| AppError::user_not_found(input.planner_id))?;

    let created = match_db::insert_match(&txn, identity.id, input.planner_id).await?;
    txn.commit().await?;

    info!(
        match_id = created.id,
        couple_id = created.couple_id,
        planner_id = created.planner_id,
        "Chat opened"
    );
    Ok(created)
}

/// Every chat the caller takes part in, newest first.
pub async fn list_chats(
    db: &DatabaseConnection,
    identity: Identity,
) -> Result<Vec<MatchResponse>, AppError> {
    let txn = begin_read_only(db).await?;
    let chats = match_db::get_matches_for_participant(&txn, identity.role, identity.id).await?;
    txn.commit().await?;

    Ok(chats.into_iter().map(MatchResponse::from).collect())
}

/// Confirm a match once every one of its quotations is confirmed.
///
/// Stores the summed price and confirmation time, then refreshes the
/// planner's portfolio statistics in the same transaction. A match that is
/// already confirmed is returned unchanged.
pub async fn confirm_all(
    db: &DatabaseConnection,
    identity: Identity,
    match_id: i64,
) -> Result<matches::Model, AppError> {
    let txn = db.begin().await?;

    let chat = find_match(&txn, match_id).await?;
    check_participant(identity, &chat)?;

    let quotations = quotation_db::get_quotations_by_match(&txn, chat.id).await?;
    let total_price = evaluate_confirmation(&quotations)?;

    if chat.is_confirmed() {
        txn.commit().await?;
        return Ok(chat);
    }

    let confirmed = match_db::confirm_match(&txn, chat, total_price, chrono::Utc::now()).await?;

    let prices = match_db::get_confirmed_prices_by_planner(&txn, confirmed.planner_id).await?;
    let stats = pricing::confirmed_deal_stats(&prices)?;
    // A planner without a portfolio has no statistics to refresh.
    if let Some(portfolio) =
        portfolio_db::get_portfolio_by_planner(&txn, confirmed.planner_id).await?
    {
        portfolios::store_confirmed_prices(&txn, portfolio, stats).await?;
    }

    txn.commit().await?;

    info!(
        match_id = confirmed.id,
        confirmed_price = confirmed.confirmed_price,
        "Match confirmed"
    );
    Ok(confirmed)
}

/// Delete a chat. Blocked while it has quotations and is still unconfirmed.
pub async fn delete_chat(
    db: &DatabaseConnection,
    identity: Identity,
    match_id: i64,
) -> Result<(), AppError> {
    let txn = db.begin().await?;

    let chat = find_match(&txn, match_id).await?;
    check_participant(identity, &chat)?;

    let has_quotations = quotation_db::has_quotations(&txn, chat.id).await?;
    ensure_deletable(&chat, has_quotations)?;

    match_db::delete_match(&txn, chat.id).await?;
    txn.commit().await?;

    info!(match_id, "Chat deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quotations::QuotationStatus;

    fn quotation(price: i64, status: QuotationStatus) -> quotations::Model {
        quotations::Model {
            id: 0,
            match_id: 1,
            title: "Hall".into(),
            price,
            company: "Grand Hall".into(),
            description: String::new(),
            status,
            modified_at: chrono::Utc::now(),
        }
    }

    fn chat(status: MatchStatus) -> matches::Model {
        matches::Model {
            id: 1,
            couple_id: 1,
            planner_id: 2,
            status,
            confirmed_price: 0,
            confirmed_at: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn all_confirmed_yields_summed_price() {
        let qs = vec![
            quotation(500, QuotationStatus::Confirmed),
            quotation(700, QuotationStatus::Confirmed),
        ];
        assert_eq!(evaluate_confirmation(&qs).unwrap(), 1200);
    }

    #[test]
    fn mixed_statuses_are_rejected() {
        let qs = vec![
            quotation(500, QuotationStatus::Confirmed),
            quotation(700, QuotationStatus::Pending),
        ];
        match evaluate_confirmation(&qs) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, QUOTATIONS_NOT_ALL_CONFIRMED),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn nothing_to_confirm() {
        match evaluate_confirmation(&[]) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, NO_QUOTATION_TO_CONFIRM),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn deletion_rules() {
        assert!(ensure_deletable(&chat(MatchStatus::Unconfirmed), false).is_ok());
        assert!(ensure_deletable(&chat(MatchStatus::Confirmed), true).is_ok());
        assert!(ensure_deletable(&chat(MatchStatus::Confirmed), false).is_ok());
        assert!(matches!(
            ensure_deletable(&chat(MatchStatus::Unconfirmed), true),
            Err(AppError::Validation(_))
        ));
    }
}
