//! Price reductions over fully loaded lists. None of these touch the database.

use crate::error::{AppError, NEGATIVE_PRICE, PRICE_OUT_OF_RANGE};
use crate::models::portfolio::{ConfirmedPriceStats, PriceItemInput};
use crate::models::{price_items, quotations};

/// Anything that carries a single price.
pub trait Priced {
    fn price(&self) -> i64;
}

impl Priced for PriceItemInput {
    fn price(&self) -> i64 {
        self.item_price
    }
}

impl Priced for price_items::Model {
    fn price(&self) -> i64 {
        self.item_price
    }
}

impl Priced for quotations::Model {
    fn price(&self) -> i64 {
        self.price
    }
}

fn checked_sum(mut prices: impl Iterator<Item = i64>) -> Result<i64, AppError> {
    prices
        .try_fold(0i64, i64::checked_add)
        .ok_or_else(|| AppError::Validation(PRICE_OUT_OF_RANGE.to_string()))
}

/// Fails with `Validation` if `price` is below zero.
pub fn ensure_price(price: i64) -> Result<(), AppError> {
    if price < 0 {
        return Err(AppError::Validation(NEGATIVE_PRICE.to_string()));
    }
    Ok(())
}

/// Fails with `Validation` if any price is below zero.
pub fn ensure_non_negative<P: Priced>(items: &[P]) -> Result<(), AppError> {
    items.iter().try_for_each(|p| ensure_price(p.price()))
}

/// Sum of a portfolio's price items.
pub fn portfolio_total<P: Priced>(items: &[P]) -> Result<i64, AppError> {
    checked_sum(items.iter().map(Priced::price))
}

/// Sum of every quotation price, whatever its status.
pub fn quotation_total(quotations: &[quotations::Model]) -> Result<i64, AppError> {
    checked_sum(quotations.iter().map(Priced::price))
}

/// Sum of the prices of confirmed quotations only.
pub fn confirmed_quotation_total(quotations: &[quotations::Model]) -> Result<i64, AppError> {
    checked_sum(
        quotations
            .iter()
            .filter(|q| q.is_confirmed())
            .map(Priced::price),
    )
}

/// Count, integer mean, min and max of a planner's confirmed match prices.
/// An empty history yields all zeroes.
pub fn confirmed_deal_stats(prices: &[i64]) -> Result<ConfirmedPriceStats, AppError> {
    if prices.is_empty() {
        return Ok(ConfirmedPriceStats::default());
    }

    let count = prices.len() as i64;
    let sum = checked_sum(prices.iter().copied())?;

    Ok(ConfirmedPriceStats {
        contract_count: count,
        avg_price: sum / count,
        min_price: prices.iter().copied().min().unwrap_or_default(),
        max_price: prices.iter().copied().max().unwrap_or_default(),
    })
}
