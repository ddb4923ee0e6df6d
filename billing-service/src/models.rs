use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};

/// One billable entry on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub category: String,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            quantity,
            unit_price,
            category: category.into(),
        }
    }

    /// quantity × unit price
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// How a discount value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Percent of the subtotal, 0..=100
    Percentage,
    /// Flat currency amount
    Fixed,
}

/// Reduction applied to an invoice total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub id: String,
    pub kind: DiscountKind,
    pub value: Decimal,
    pub description: String,
}

impl Discount {
    /// Amount this discount takes off the given subtotal.
    pub fn contribution(&self, subtotal: Decimal) -> Decimal {
        match self.kind {
            DiscountKind::Percentage => subtotal * self.value / Decimal::ONE_HUNDRED,
            DiscountKind::Fixed => self.value,
        }
    }

    /// [`Discount::contribution`] that returns `None` instead of overflowing.
    pub fn checked_contribution(&self, subtotal: Decimal) -> Option<Decimal> {
        match self.kind {
            DiscountKind::Percentage => subtotal
                .checked_mul(self.value)
                .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED)),
            DiscountKind::Fixed => Some(self.value),
        }
    }
}

/// A discount that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiscount {
    pub kind: DiscountKind,
    pub value: Decimal,
    pub description: String,
}

impl NewDiscount {
    pub fn percentage(value: Decimal, description: impl Into<String>) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
            description: description.into(),
        }
    }

    pub fn fixed(value: Decimal, description: impl Into<String>) -> Self {
        Self {
            kind: DiscountKind::Fixed,
            value,
            description: description.into(),
        }
    }

    /// Rejects negative values and percentages above 100.
    pub fn validate(&self) -> BillingResult<()> {
        if self.value < Decimal::ZERO {
            return Err(BillingError::Validation(format!(
                "Discount value cannot be negative: {}",
                self.value
            )));
        }
        if self.kind == DiscountKind::Percentage && self.value > Decimal::ONE_HUNDRED {
            return Err(BillingError::Validation(format!(
                "Percentage discount must be between 0 and 100: {}",
                self.value
            )));
        }
        Ok(())
    }

    pub(crate) fn with_id(self, id: String) -> Discount {
        Discount {
            id,
            kind: self.kind,
            value: self.value,
            description: self.description,
        }
    }
}

/// Selectable value of a cost variable with its surcharge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOption {
    pub value: String,
    pub price: Decimal,
}

/// Cost-affecting choice axis of a procedure (e.g. room type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub options: Vec<PriceOption>,
}

impl Variable {
    pub fn option(&self, value: &str) -> Option<&PriceOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// Billable medical procedure with configurable variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: String,
    pub name: String,
    pub base_price: Decimal,
    pub variables: Vec<Variable>,
}

impl Procedure {
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|variable| variable.id == id)
    }
}

/// In-progress choice of one option value per variable id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<String, String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `variable_id` set to `option_value`.
    pub fn with(mut self, variable_id: impl Into<String>, option_value: impl Into<String>) -> Self {
        self.0.insert(variable_id.into(), option_value.into());
        self
    }

    pub fn get(&self, variable_id: &str) -> Option<&str> {
        self.0.get(variable_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_amount() {
        let item = LineItem::new("3", "Private Room (per day)", 2, dec!(5000), "Accommodation");
        assert_eq!(item.amount(), dec!(10000));
    }

    #[test]
    fn test_discount_contribution() {
        let senior = NewDiscount::percentage(dec!(10), "Senior").with_id("1".into());
        let insurance = NewDiscount::fixed(dec!(2000), "Insurance").with_id("2".into());

        assert_eq!(senior.contribution(dec!(13500)), dec!(1350));
        assert_eq!(insurance.contribution(dec!(13500)), dec!(2000));
        assert_eq!(insurance.contribution(Decimal::ZERO), dec!(2000));
    }

    #[test]
    fn test_new_discount_validation() {
        assert!(NewDiscount::percentage(dec!(100), "all").validate().is_ok());
        assert!(NewDiscount::fixed(dec!(0), "none").validate().is_ok());
        assert!(NewDiscount::percentage(dec!(100.5), "too much").validate().is_err());
        assert!(NewDiscount::fixed(dec!(-1), "negative").validate().is_err());
        // Fixed discounts have no upper bound
        assert!(NewDiscount::fixed(dec!(250000), "write-off").validate().is_ok());
    }

    #[test]
    fn test_selection_overwrites_choice() {
        let selection = Selection::new().with("room", "general").with("room", "deluxe");
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get("room"), Some("deluxe"));
        assert_eq!(selection.get("duration"), None);
    }

    #[test]
    fn test_discount_kind_serde() {
        let json = serde_json::to_string(&DiscountKind::Percentage).unwrap();
        assert_eq!(json, "\"percentage\"");
        let kind: DiscountKind = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(kind, DiscountKind::Fixed);
    }
}
