//! Procedure cost estimates.
//!
//! The estimate form may be partially filled: a variable with no selection,
//! or a selection naming an option the variable does not offer, adds nothing
//! to the estimate instead of failing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::ProcedureCatalog;
use crate::models::{Procedure, Selection};

/// Surcharge resolved for one variable of a procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateLine {
    pub variable_id: String,
    pub variable_name: String,
    /// Matched option value, `None` when unselected or unknown
    pub option: Option<String>,
    pub surcharge: Decimal,
}

/// Itemized estimate for one procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    pub procedure_id: String,
    pub procedure_name: String,
    pub base_price: Decimal,
    pub lines: Vec<EstimateLine>,
    pub total: Decimal,
}

/// Base price plus the selected surcharge of every variable, or zero when no
/// procedure is chosen.
pub fn estimate_total(procedure: Option<&Procedure>, selection: &Selection) -> Decimal {
    match procedure {
        Some(procedure) => itemize(procedure, selection).total,
        None => Decimal::ZERO,
    }
}

pub fn reset_selection() -> Selection {
    Selection::new()
}

/// Resolves the selection against the procedure's variables in order.
pub fn itemize(procedure: &Procedure, selection: &Selection) -> EstimateBreakdown {
    let lines: Vec<EstimateLine> = procedure
        .variables
        .iter()
        .map(|variable| {
            let option = selection
                .get(&variable.id)
                .and_then(|value| variable.option(value));
            EstimateLine {
                variable_id: variable.id.clone(),
                variable_name: variable.name.clone(),
                option: option.map(|o| o.value.clone()),
                surcharge: option.map(|o| o.price).unwrap_or(Decimal::ZERO),
            }
        })
        .collect();

    let total = procedure.base_price + lines.iter().map(|line| line.surcharge).sum::<Decimal>();

    EstimateBreakdown {
        procedure_id: procedure.id.clone(),
        procedure_name: procedure.name.clone(),
        base_price: procedure.base_price,
        lines,
        total,
    }
}

/// State of the estimate form. Updates consume the state and return the
/// next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorState {
    pub procedure_id: Option<String>,
    pub selection: Selection,
}

impl EstimatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses a procedure. Switching to a different procedure discards the
    /// selection.
    pub fn with_procedure(self, procedure_id: impl Into<String>) -> Self {
        let procedure_id = procedure_id.into();
        if self.procedure_id.as_deref() == Some(procedure_id.as_str()) {
            return self;
        }
        Self {
            procedure_id: Some(procedure_id),
            selection: reset_selection(),
        }
    }

    pub fn with_choice(self, variable_id: impl Into<String>, option_value: impl Into<String>) -> Self {
        Self {
            selection: self.selection.with(variable_id, option_value),
            ..self
        }
    }

    pub fn clear_procedure(self) -> Self {
        Self::new()
    }

    pub fn procedure<'a>(&self, catalog: &'a ProcedureCatalog) -> Option<&'a Procedure> {
        self.procedure_id.as_deref().and_then(|id| catalog.find(id))
    }

    pub fn total(&self, catalog: &ProcedureCatalog) -> Decimal {
        estimate_total(self.procedure(catalog), &self.selection)
    }
}
