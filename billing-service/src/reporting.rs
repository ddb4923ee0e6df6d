use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::invoice::InvoiceStatus;

/// Billing reports
pub struct BillingReports;

/// Entry of the recent invoices list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: u32,
    pub patient: String,
    pub amount: Decimal,
    pub issued_on: NaiveDate,
    pub due_in_days: u32,
    pub status: InvoiceStatus,
}

/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Paid,
    Pending,
    Processing,
}

/// Payment transaction shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u32,
    pub patient: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub date: NaiveDate,
}

/// Amount and count for one transaction status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTotal {
    pub status: TransactionStatus,
    pub count: usize,
    pub amount: Decimal,
}

/// Revenue summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub total_billed: Decimal,
    pub collected: Decimal,
    pub outstanding: Decimal,
    /// collected / billed × 100, one decimal place
    pub collection_rate_percent: Decimal,
    pub by_status: Vec<StatusTotal>,
}

impl BillingReports {
    /// Aggregates transactions into billed, collected and outstanding amounts.
    pub fn summarize(transactions: &[Transaction]) -> RevenueSummary {
        let total_billed: Decimal = transactions.iter().map(|t| t.amount).sum();
        let collected: Decimal = transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Paid)
            .map(|t| t.amount)
            .sum();

        let collection_rate_percent = if total_billed.is_zero() {
            Decimal::ZERO
        } else {
            (collected / total_billed * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        };

        let by_status = [
            TransactionStatus::Paid,
            TransactionStatus::Pending,
            TransactionStatus::Processing,
        ]
        .into_iter()
        .map(|status| {
            let matching = transactions.iter().filter(|t| t.status == status);
            StatusTotal {
                status,
                count: matching.clone().count(),
                amount: matching.map(|t| t.amount).sum(),
            }
        })
        .collect();

        RevenueSummary {
            total_billed,
            collected,
            outstanding: total_billed - collected,
            collection_rate_percent,
            by_status,
        }
    }

    /// Newest first; ties keep their original order.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }

    /// Sum of invoices that are not yet paid.
    pub fn outstanding_invoices(invoices: &[InvoiceRecord]) -> Decimal {
        invoices
            .iter()
            .filter(|invoice| invoice.status != InvoiceStatus::Paid)
            .map(|invoice| invoice.amount)
            .sum()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn seed_recent_invoices() -> Vec<InvoiceRecord> {
    vec![
        InvoiceRecord {
            id: 1001,
            patient: "John Doe".to_string(),
            amount: dec!(13000),
            issued_on: date(2024, 3, 15),
            due_in_days: 5,
            status: InvoiceStatus::Pending,
        },
        InvoiceRecord {
            id: 1002,
            patient: "Jane Smith".to_string(),
            amount: dec!(14000),
            issued_on: date(2024, 3, 16),
            due_in_days: 3,
            status: InvoiceStatus::Paid,
        },
        InvoiceRecord {
            id: 1003,
            patient: "Mike Johnson".to_string(),
            amount: dec!(15000),
            issued_on: date(2024, 3, 14),
            due_in_days: 7,
            status: InvoiceStatus::Overdue,
        },
    ]
}

pub fn seed_transactions() -> Vec<Transaction> {
    let transaction = |id, patient: &str, amount, status, date| Transaction {
        id,
        patient: patient.to_string(),
        amount,
        status,
        date,
    };
    vec![
        transaction(1, "John Doe", dec!(125000), TransactionStatus::Paid, date(2024, 3, 15)),
        transaction(2, "Sarah Smith", dec!(85000), TransactionStatus::Pending, date(2024, 3, 14)),
        transaction(3, "Mike Johnson", dec!(210000), TransactionStatus::Processing, date(2024, 3, 14)),
        transaction(4, "Emily Brown", dec!(150000), TransactionStatus::Paid, date(2024, 3, 13)),
    ]
}
