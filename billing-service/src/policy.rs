use serde::{Deserialize, Serialize};

/// What to do when discounts exceed the subtotal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeTotalPolicy {
    /// Report the negative amount unchanged
    #[default]
    Allow,
    ClampAtZero,
    Reject,
}

/// Whether zero or negative line quantities are accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityPolicy {
    #[default]
    PassThrough,
    RequirePositive,
}

/// Hardening switches for invoice totals. The defaults reproduce the
/// unchecked behaviour of the billing screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingPolicy {
    pub negative_total: NegativeTotalPolicy,
    pub quantity: QuantityPolicy,
}

impl BillingPolicy {
    /// Rejects negative totals and non-positive quantities.
    pub fn strict() -> Self {
        Self {
            negative_total: NegativeTotalPolicy::Reject,
            quantity: QuantityPolicy::RequirePositive,
        }
    }
}
