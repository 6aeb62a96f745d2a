use sea_orm::*;

use crate::models::quotations::{self, CreateQuotation, QuotationStatus, UpdateQuotation};

/// Insert a new quotation into a match (defaults to Pending).
pub async fn insert_quotation<C: ConnectionTrait>(
    db: &C,
    match_id: i64,
    input: CreateQuotation,
) -> Result<quotations::Model, DbErr> {
    let new_quotation = quotations::ActiveModel {
        match_id: Set(match_id),
        title: Set(input.title),
        price: Set(input.price),
        company: Set(input.company),
        description: Set(input.description),
        status: Set(QuotationStatus::Pending),
        modified_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_quotation.insert(db).await
}

/// Fetch a single quotation by ID.
pub async fn get_quotation_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<quotations::Model>, DbErr> {
    quotations::Entity::find_by_id(id).one(db).await
}

/// Fetch all quotations of a match in creation order.
pub async fn get_quotations_by_match<C: ConnectionTrait>(
    db: &C,
    match_id: i64,
) -> Result<Vec<quotations::Model>, DbErr> {
    quotations::Entity::find()
        .filter(quotations::Column::MatchId.eq(match_id))
        .order_by_asc(quotations::Column::Id)
        .all(db)
        .await
}

/// Fetch the quotations of many matches in one query.
pub async fn get_quotations_by_matches<C: ConnectionTrait>(
    db: &C,
    match_ids: Vec<i64>,
) -> Result<Vec<quotations::Model>, DbErr> {
    if match_ids.is_empty() {
        return Ok(Vec::new());
    }

    quotations::Entity::find()
        .filter(quotations::Column::MatchId.is_in(match_ids))
        .order_by_asc(quotations::Column::Id)
        .all(db)
        .await
}

/// Whether a match has at least one quotation.
pub async fn has_quotations<C: ConnectionTrait>(db: &C, match_id: i64) -> Result<bool, DbErr> {
    let first = quotations::Entity::find()
        .filter(quotations::Column::MatchId.eq(match_id))
        .one(db)
        .await?;

    Ok(first.is_some())
}

/// Apply a partial update to a quotation.
pub async fn update_quotation<C: ConnectionTrait>(
    db: &C,
    existing: quotations::Model,
    input: UpdateQuotation,
) -> Result<quotations::Model, DbErr> {
    let mut active: quotations::ActiveModel = existing.into();

    input.title.apply(&mut active.title);
    input.price.apply(&mut active.price);
    input.company.apply(&mut active.company);
    input.description.apply(&mut active.description);
    active.modified_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Mark a quotation confirmed.
pub async fn confirm_quotation<C: ConnectionTrait>(
    db: &C,
    existing: quotations::Model,
) -> Result<quotations::Model, DbErr> {
    let mut active: quotations::ActiveModel = existing.into();
    active.status = Set(QuotationStatus::Confirmed);
    active.modified_at = Set(chrono::Utc::now());

    active.update(db).await
}
