use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculator::{add_discount, summarize, update_quantity, InvoiceTotals};
use crate::catalog::{seed_discounts, seed_line_items};
use crate::error::{BillingError, BillingResult};
use crate::models::{Discount, LineItem, NewDiscount};
use crate::policy::BillingPolicy;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    Cash,
    DigitalWallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cash,
        PaymentMethod::DigitalWallet,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit-card",
            PaymentMethod::BankTransfer => "bank-transfer",
            PaymentMethod::Cash => "cash",
            PaymentMethod::DigitalWallet => "digital-wallet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::DigitalWallet => "Digital Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.id() == s)
            .ok_or_else(|| BillingError::Validation(format!("Unknown payment method: {}", s)))
    }
}

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

/// Issued invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub patient_name: String,
    pub description: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<LineItem>,
    pub discounts: Vec<Discount>,
    pub totals: InvoiceTotals,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

/// Invoice being composed. Every update consumes the draft and returns the
/// next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub patient_name: String,
    pub description: String,
    pub payment_method: Option<PaymentMethod>,
    pub items: Vec<LineItem>,
    pub discounts: Vec<Discount>,
}

impl InvoiceDraft {
    pub fn new(items: Vec<LineItem>, discounts: Vec<Discount>) -> Self {
        Self {
            items,
            discounts,
            ..Default::default()
        }
    }

    /// Draft pre-filled with the standard line items and discounts.
    pub fn seeded() -> Self {
        Self::new(seed_line_items(), seed_discounts())
    }

    pub fn with_patient(self, patient_name: impl Into<String>) -> Self {
        Self {
            patient_name: patient_name.into(),
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    pub fn with_payment_method(self, method: PaymentMethod) -> Self {
        Self {
            payment_method: Some(method),
            ..self
        }
    }

    pub fn with_quantity(self, item_id: &str, quantity: i64) -> Self {
        Self {
            items: update_quantity(&self.items, item_id, quantity),
            ..self
        }
    }

    pub fn with_discount(self, discount: NewDiscount) -> Self {
        Self {
            discounts: add_discount(&self.discounts, discount),
            ..self
        }
    }

    pub fn totals(&self, policy: &BillingPolicy) -> BillingResult<InvoiceTotals> {
        summarize(&self.items, &self.discounts, policy)
    }

    /// Clears the form fields, keeping line items and discounts.
    pub fn reset_form(self) -> Self {
        Self {
            patient_name: String::new(),
            description: String::new(),
            payment_method: None,
            ..self
        }
    }

    /// Validates the draft and issues an invoice.
    pub fn submit(self, policy: &BillingPolicy) -> BillingResult<Invoice> {
        if self.patient_name.trim().is_empty() {
            return Err(BillingError::Validation("Patient name is required".to_string()));
        }
        let payment_method = self
            .payment_method
            .ok_or_else(|| BillingError::Validation("Please select a payment method".to_string()))?;

        let totals = self.totals(policy)?;
        let id = Uuid::new_v4();
        let invoice_number = format!(
            "INV-{}",
            id.simple().to_string().chars().take(8).collect::<String>().to_uppercase()
        );

        tracing::info!(
            invoice_number = %invoice_number,
            payment_method = payment_method.id(),
            line_items = self.items.len(),
            total = %totals.total,
            "Invoice created"
        );

        Ok(Invoice {
            id,
            invoice_number,
            patient_name: self.patient_name,
            description: self.description,
            payment_method,
            items: self.items,
            discounts: self.discounts,
            totals,
            status: InvoiceStatus::Pending,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_method_ids_round_trip() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.id().parse::<PaymentMethod>().unwrap(), method);
        }
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serde_uses_ids() {
        let json = serde_json::to_string(&PaymentMethod::DigitalWallet).unwrap();
        assert_eq!(json, "\"digital-wallet\"");
    }

    #[test]
    fn test_submit_requires_payment_method() {
        let err = InvoiceDraft::seeded()
            .with_patient("John Doe")
            .submit(&BillingPolicy::default())
            .unwrap_err();
        assert_eq!(
            err,
            BillingError::Validation("Please select a payment method".to_string())
        );
    }

    #[test]
    fn test_submit_requires_patient_name() {
        let err = InvoiceDraft::seeded()
            .with_patient("   ")
            .with_payment_method(PaymentMethod::Cash)
            .submit(&BillingPolicy::default())
            .unwrap_err();
        assert!(matches!(err, BillingError::Validation(msg) if msg.contains("Patient name")));
    }

    #[test]
    fn test_submit_issues_pending_invoice() {
        let invoice = InvoiceDraft::seeded()
            .with_patient("Jane Smith")
            .with_payment_method(PaymentMethod::BankTransfer)
            .submit(&BillingPolicy::default())
            .unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.totals.total, dec!(10150));
        assert!(invoice.invoice_number.starts_with("INV-"));
        assert_eq!(invoice.invoice_number.len(), 12);
    }

    #[test]
    fn test_invoice_json_fields() {
        let before = Utc::now();
        let invoice = InvoiceDraft::seeded()
            .with_patient("Jane Smith")
            .with_payment_method(PaymentMethod::Cash)
            .submit(&BillingPolicy::default())
            .unwrap();
        assert!(invoice.created_at >= before);

        let value = serde_json::to_value(&invoice).unwrap();
        assert_eq!(value["invoice_number"], invoice.invoice_number.as_str());
        assert_eq!(value["payment_method"], "cash");
        assert_eq!(value["status"], "pending");
        assert!(value["created_at"].is_string());
        assert!(value.get("issued_on").is_none());
    }

    #[test]
    fn test_submit_applies_policy() {
        let result = InvoiceDraft::seeded()
            .with_patient("Mike Johnson")
            .with_payment_method(PaymentMethod::CreditCard)
            .with_discount(NewDiscount::fixed(dec!(20000), "Charity"))
            .submit(&BillingPolicy::strict());
        assert!(matches!(result, Err(BillingError::NegativeTotal(_))));
    }

    #[test]
    fn test_reset_form_keeps_line_items() {
        let draft = InvoiceDraft::seeded()
            .with_patient("John Doe")
            .with_description("Follow-up")
            .with_payment_method(PaymentMethod::Cash)
            .with_quantity("3", 4)
            .reset_form();

        assert!(draft.patient_name.is_empty());
        assert!(draft.description.is_empty());
        assert_eq!(draft.payment_method, None);
        assert_eq!(draft.items[2].quantity, 4);
        assert_eq!(draft.discounts.len(), 2);
    }
}
