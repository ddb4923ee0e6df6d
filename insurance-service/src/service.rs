use logger_redacted::PiiRedactor;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{InsuranceError, InsuranceResult};
use crate::models::{seed_claims, Claim, ClaimStatus};

/// Claim counts and amounts across the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub total_claims: usize,
    pub total_amount: Decimal,
    pub in_review: usize,
    pub approved: usize,
    pub rejected: usize,
    /// approved / decided × 100, one decimal place; zero before any decision
    pub approval_rate_percent: Decimal,
}

/// Read-only claim registry
#[derive(Debug, Clone)]
pub struct ClaimRegistry {
    claims: Vec<Claim>,
    redactor: PiiRedactor,
}

impl ClaimRegistry {
    pub fn new(claims: Vec<Claim>, redactor: PiiRedactor) -> Self {
        Self { claims, redactor }
    }

    /// Registry holding the standard claims.
    pub fn seeded(redactor: PiiRedactor) -> Self {
        Self::new(seed_claims(), redactor)
    }

    pub fn all(&self) -> &[Claim] {
        &self.claims
    }

    /// Get claim by ID
    pub fn get(&self, claim_id: u32) -> InsuranceResult<&Claim> {
        let claim = self
            .claims
            .iter()
            .find(|claim| claim.id == claim_id)
            .ok_or(InsuranceError::ClaimNotFound(claim_id))?;
        tracing::debug!(
            claim_id,
            patient = %self.redactor.pseudonymize("PATIENT", &claim.patient_name),
            policy = %self.redactor.redact(&claim.policy_number),
            "Claim accessed"
        );
        Ok(claim)
    }

    /// Claims whose id, patient, description, provider or policy number
    /// contains `query`, ignoring case. A blank query matches every claim.
    pub fn search(&self, query: &str) -> Vec<&Claim> {
        let needle = query.trim().to_lowercase();
        let results: Vec<&Claim> = self
            .claims
            .iter()
            .filter(|claim| needle.is_empty() || claim.matches(&needle))
            .collect();
        tracing::debug!(
            query = %self.redactor.redact(query),
            matches = results.len(),
            "Claim search"
        );
        results
    }

    pub fn by_status(&self, status: ClaimStatus) -> Vec<&Claim> {
        self.claims.iter().filter(|claim| claim.status == status).collect()
    }

    pub fn summary(&self) -> ClaimSummary {
        summarize(self.claims.iter())
    }
}

/// Summarizes any subset of claims, such as a search result.
pub fn summarize<'a>(claims: impl IntoIterator<Item = &'a Claim>) -> ClaimSummary {
    let mut summary = ClaimSummary {
        total_claims: 0,
        total_amount: Decimal::ZERO,
        in_review: 0,
        approved: 0,
        rejected: 0,
        approval_rate_percent: Decimal::ZERO,
    };

    for claim in claims {
        summary.total_claims += 1;
        summary.total_amount += claim.amount;
        match claim.status {
            ClaimStatus::InReview => summary.in_review += 1,
            ClaimStatus::Approved => summary.approved += 1,
            ClaimStatus::Rejected => summary.rejected += 1,
        }
    }

    let decided = summary.approved + summary.rejected;
    if decided > 0 {
        summary.approval_rate_percent = (Decimal::from(summary.approved) / Decimal::from(decided)
            * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    }

    summary
}
