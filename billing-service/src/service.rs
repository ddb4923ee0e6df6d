use crate::calculator::{parse_quantity, InvoiceTotals};
use crate::catalog::ProcedureCatalog;
use crate::error::{BillingError, BillingResult};
use crate::estimator::{itemize, EstimateBreakdown};
use crate::invoice::{Invoice, InvoiceDraft};
use crate::models::{NewDiscount, Selection};
use crate::policy::{BillingPolicy, QuantityPolicy};

/// Billing service
///
/// Applies the configured [`BillingPolicy`] on top of the pure calculator
/// and estimator functions and logs each operation.
#[derive(Debug, Clone)]
pub struct BillingService {
    policy: BillingPolicy,
    catalog: ProcedureCatalog,
}

impl BillingService {
    /// Create a new billing service over the standard procedure catalog
    pub fn new(policy: BillingPolicy) -> Self {
        Self::with_catalog(policy, ProcedureCatalog::standard())
    }

    pub fn with_catalog(policy: BillingPolicy, catalog: ProcedureCatalog) -> Self {
        Self { policy, catalog }
    }

    pub fn policy(&self) -> &BillingPolicy {
        &self.policy
    }

    pub fn catalog(&self) -> &ProcedureCatalog {
        &self.catalog
    }

    /// Totals of a draft under the configured policy
    pub fn invoice_totals(&self, draft: &InvoiceDraft) -> BillingResult<InvoiceTotals> {
        let totals = draft.totals(&self.policy)?;
        tracing::debug!(
            subtotal = %totals.subtotal,
            discount_total = %totals.discount_total,
            total = %totals.total,
            "Invoice totals computed"
        );
        Ok(totals)
    }

    /// Applies a quantity edit given as raw text.
    pub fn update_quantity(&self, draft: InvoiceDraft, item_id: &str, input: &str) -> BillingResult<InvoiceDraft> {
        let quantity = parse_quantity(input)?;
        if self.policy.quantity == QuantityPolicy::RequirePositive && quantity < 1 {
            return Err(BillingError::InvalidQuantity {
                item_id: item_id.to_string(),
                quantity,
            });
        }
        if !draft.items.iter().any(|item| item.id == item_id) {
            tracing::debug!(item_id, "Quantity update for unknown line item ignored");
        }
        Ok(draft.with_quantity(item_id, quantity))
    }

    /// Validates and appends a discount
    pub fn add_discount(&self, draft: InvoiceDraft, discount: NewDiscount) -> BillingResult<InvoiceDraft> {
        discount.validate()?;
        tracing::debug!(
            kind = ?discount.kind,
            value = %discount.value,
            "Discount added"
        );
        Ok(draft.with_discount(discount))
    }

    /// Submits a draft and issues an invoice
    pub fn create_invoice(&self, draft: InvoiceDraft) -> BillingResult<Invoice> {
        draft.submit(&self.policy).map_err(|err| {
            tracing::warn!(error = %err, "Invoice rejected");
            err
        })
    }

    /// Itemized estimate for a catalog procedure. Selections naming unknown
    /// variables or options are logged and contribute nothing.
    pub fn estimate(&self, procedure_id: &str, selection: &Selection) -> BillingResult<EstimateBreakdown> {
        let procedure = self
            .catalog
            .find(procedure_id)
            .ok_or_else(|| BillingError::UnknownProcedure(procedure_id.to_string()))?;

        for (variable_id, value) in selection.iter() {
            match procedure.variable(variable_id) {
                None => tracing::warn!(procedure_id, variable_id, "Selection for unknown variable"),
                Some(variable) if variable.option(value).is_none() => {
                    tracing::warn!(procedure_id, variable_id, option = value, "Selection for unknown option")
                }
                Some(_) => {}
            }
        }

        let breakdown = itemize(procedure, selection);
        tracing::info!(
            procedure_id,
            selected = selection.len(),
            total = %breakdown.total,
            "Cost estimate computed"
        );
        Ok(breakdown)
    }
}

impl Default for BillingService {
    fn default() -> Self {
        Self::new(BillingPolicy::default())
    }
}
