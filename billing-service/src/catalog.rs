use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Discount, DiscountKind, LineItem, PriceOption, Procedure, Variable};

/// Read-only list of estimable procedures
#[derive(Debug, Clone, Default)]
pub struct ProcedureCatalog {
    procedures: Vec<Procedure>,
}

impl ProcedureCatalog {
    pub fn new(procedures: Vec<Procedure>) -> Self {
        Self { procedures }
    }

    /// Reference procedures offered by the cost estimator.
    pub fn standard() -> Self {
        Self::new(vec![
            Procedure {
                id: "surgery1".to_string(),
                name: "General Surgery".to_string(),
                base_price: dec!(50000),
                variables: vec![
                    variable(
                        "room",
                        "Room Type",
                        &[("general", dec!(2000)), ("private", dec!(5000)), ("deluxe", dec!(8000))],
                    ),
                    variable(
                        "duration",
                        "Expected Duration",
                        &[
                            ("1-2 hours", dec!(10000)),
                            ("2-4 hours", dec!(20000)),
                            ("4+ hours", dec!(30000)),
                        ],
                    ),
                ],
            },
            Procedure {
                id: "consultation1".to_string(),
                name: "Specialist Consultation".to_string(),
                base_price: dec!(2000),
                variables: vec![variable(
                    "specialist",
                    "Specialist Type",
                    &[("general", dec!(1000)), ("senior", dec!(2000)), ("hod", dec!(3000))],
                )],
            },
        ])
    }

    pub fn find(&self, id: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|procedure| procedure.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Procedure> {
        self.procedures.iter()
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

fn variable(id: &str, name: &str, options: &[(&str, Decimal)]) -> Variable {
    Variable {
        id: id.to_string(),
        name: name.to_string(),
        options: options
            .iter()
            .map(|(value, price)| PriceOption {
                value: (*value).to_string(),
                price: *price,
            })
            .collect(),
    }
}

/// Line items a new invoice draft starts with.
pub fn seed_line_items() -> Vec<LineItem> {
    vec![
        LineItem::new("1", "Doctor Consultation", 1, dec!(2000), "Consultation"),
        LineItem::new("2", "Blood Test", 1, dec!(1500), "Laboratory"),
        LineItem::new("3", "Private Room (per day)", 2, dec!(5000), "Accommodation"),
    ]
}

/// Discounts a new invoice draft starts with.
pub fn seed_discounts() -> Vec<Discount> {
    vec![
        Discount {
            id: "1".to_string(),
            kind: DiscountKind::Percentage,
            value: dec!(10),
            description: "Senior Citizen Discount".to_string(),
        },
        Discount {
            id: "2".to_string(),
            kind: DiscountKind::Fixed,
            value: dec!(2000),
            description: "Insurance Coverage".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_lookup() {
        let catalog = ProcedureCatalog::standard();
        assert_eq!(catalog.len(), 2);

        let surgery = catalog.find("surgery1").unwrap();
        assert_eq!(surgery.name, "General Surgery");
        assert_eq!(surgery.variable("duration").unwrap().options.len(), 3);
        assert!(catalog.find("surgery2").is_none());
    }

    #[test]
    fn test_variable_ids_unique_within_procedure() {
        for procedure in ProcedureCatalog::standard().iter() {
            let mut ids: Vec<&str> = procedure.variables.iter().map(|v| v.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), procedure.variables.len(), "{}", procedure.id);
        }
    }

    #[test]
    fn test_seed_data_ids() {
        let item_ids: Vec<String> = seed_line_items().into_iter().map(|i| i.id).collect();
        assert_eq!(item_ids, vec!["1", "2", "3"]);
        assert_eq!(seed_discounts().len(), 2);
    }
}
