use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::InsuranceError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    #[serde(rename = "In Review")]
    InReview,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ClaimStatus::InReview => "In Review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClaimStatus {
    type Err = InsuranceError;

    /// Accepts the label in any case, with space, dash or underscore.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "inreview" => Ok(ClaimStatus::InReview),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            _ => Err(InsuranceError::UnknownStatus(s.to_string())),
        }
    }
}

/// Insurance claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: u32,
    pub patient_name: String,
    pub amount: Decimal,
    pub submitted_date: NaiveDate,
    pub status: ClaimStatus,
    pub description: String,
    pub insurance_provider: String,
    pub policy_number: String,
}

impl Claim {
    /// Case-insensitive substring match over the searchable fields.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.id.to_string().contains(needle)
            || [
                &self.patient_name,
                &self.description,
                &self.insurance_provider,
                &self.policy_number,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn seed_claims() -> Vec<Claim> {
    vec![
        Claim {
            id: 2001,
            patient_name: "John Doe".to_string(),
            amount: dec!(25000),
            submitted_date: date(2024, 3, 15),
            status: ClaimStatus::InReview,
            description: "Emergency appendectomy procedure".to_string(),
            insurance_provider: "HealthGuard Insurance".to_string(),
            policy_number: "HG-2024-1234".to_string(),
        },
        Claim {
            id: 2002,
            patient_name: "Sarah Smith".to_string(),
            amount: dec!(18000),
            submitted_date: date(2024, 3, 14),
            status: ClaimStatus::Approved,
            description: "Diagnostic tests and consultation".to_string(),
            insurance_provider: "MediCare Plus".to_string(),
            policy_number: "MP-2024-5678".to_string(),
        },
        Claim {
            id: 2003,
            patient_name: "Mike Johnson".to_string(),
            amount: dec!(35000),
            submitted_date: date(2024, 3, 13),
            status: ClaimStatus::InReview,
            description: "Physiotherapy sessions".to_string(),
            insurance_provider: "CarePlus Insurance".to_string(),
            policy_number: "CP-2024-9012".to_string(),
        },
    ]
}
