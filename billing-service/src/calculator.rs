//! Invoice totals over line items and discounts.
//!
//! Every function here takes a snapshot and returns a new value; nothing is
//! mutated in place. Percentage discounts are always evaluated against the
//! subtotal of the items passed in, so a quantity change is reflected in the
//! discount total on the next call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};
use crate::models::{Discount, LineItem, NewDiscount};
use crate::policy::{BillingPolicy, NegativeTotalPolicy, QuantityPolicy};

/// Derived amounts for one invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub total: Decimal,
}

/// Amount contributed by a single row.
pub fn line_amount(item: &LineItem) -> Decimal {
    item.amount()
}

pub fn compute_subtotal(items: &[LineItem]) -> Decimal {
    items.iter().map(LineItem::amount).sum()
}

pub fn compute_discount_total(items: &[LineItem], discounts: &[Discount]) -> Decimal {
    let subtotal = compute_subtotal(items);
    discounts
        .iter()
        .map(|discount| discount.contribution(subtotal))
        .sum()
}

/// Subtotal minus discounts. May be negative.
pub fn compute_total(items: &[LineItem], discounts: &[Discount]) -> Decimal {
    compute_subtotal(items) - compute_discount_total(items, discounts)
}

/// Replaces the quantity of the item with `item_id`. Returns an unchanged
/// copy when no item matches. The quantity is not validated.
pub fn update_quantity(items: &[LineItem], item_id: &str, new_quantity: i64) -> Vec<LineItem> {
    items
        .iter()
        .map(|item| {
            if item.id == item_id {
                LineItem {
                    quantity: new_quantity,
                    ..item.clone()
                }
            } else {
                item.clone()
            }
        })
        .collect()
}

/// Appends `new_discount` with the next sequential id (`len + 1`, advanced
/// past any id already in use).
pub fn add_discount(discounts: &[Discount], new_discount: NewDiscount) -> Vec<Discount> {
    let id = next_discount_id(discounts);
    let mut updated = discounts.to_vec();
    updated.push(new_discount.with_id(id));
    updated
}

fn next_discount_id(discounts: &[Discount]) -> String {
    let mut candidate = discounts.len() + 1;
    while discounts.iter().any(|d| d.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Parses the text of a quantity edit. Non-numeric input is rejected;
/// zero and negative numbers are returned as-is.
pub fn parse_quantity(input: &str) -> BillingResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| BillingError::Validation(format!("Quantity must be a whole number: '{}'", input)))
}

/// Computes all three totals and applies `policy`.
pub fn summarize(
    items: &[LineItem],
    discounts: &[Discount],
    policy: &BillingPolicy,
) -> BillingResult<InvoiceTotals> {
    if policy.quantity == QuantityPolicy::RequirePositive {
        if let Some(item) = items.iter().find(|item| item.quantity < 1) {
            return Err(BillingError::InvalidQuantity {
                item_id: item.id.clone(),
                quantity: item.quantity,
            });
        }
    }

    let subtotal = checked_subtotal(items)?;
    let discount_total = checked_discount_total(subtotal, discounts)?;
    let raw_total = subtotal
        .checked_sub(discount_total)
        .ok_or(BillingError::AmountOutOfRange("total"))?;

    let total = if raw_total < Decimal::ZERO {
        match policy.negative_total {
            NegativeTotalPolicy::Allow => raw_total,
            NegativeTotalPolicy::ClampAtZero => Decimal::ZERO,
            NegativeTotalPolicy::Reject => return Err(BillingError::NegativeTotal(raw_total)),
        }
    } else {
        raw_total
    };

    Ok(InvoiceTotals {
        subtotal,
        discount_total,
        total,
    })
}

fn checked_subtotal(items: &[LineItem]) -> BillingResult<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        item.unit_price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|amount| acc.checked_add(amount))
            .ok_or(BillingError::AmountOutOfRange("subtotal"))
    })
}

fn checked_discount_total(subtotal: Decimal, discounts: &[Discount]) -> BillingResult<Decimal> {
    discounts.iter().try_fold(Decimal::ZERO, |acc, discount| {
        discount
            .checked_contribution(subtotal)
            .and_then(|amount| acc.checked_add(amount))
            .ok_or(BillingError::AmountOutOfRange("discount total"))
    })
}
