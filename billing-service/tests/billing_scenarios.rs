/// End-to-end billing scenarios over the standard seed data
///
/// Covers:
/// - Invoice totals with a percentage and a flat discount
/// - Quantity edits flowing into the subtotal
/// - Procedure estimates with full and empty selections
/// - Discount id assignment

#[cfg(test)]
mod tests {
    use billing_service::{
        add_discount, compute_discount_total, compute_subtotal, compute_total, estimate_total,
        seed_discounts, seed_line_items, update_quantity, BillingPolicy, BillingService,
        DiscountKind, EstimatorState, InvoiceDraft, NewDiscount, PaymentMethod, ProcedureCatalog,
        Selection,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

// =============================================================================
// INVOICE TOTALS
// =============================================================================

#[test]
fn test_seed_invoice_totals() {
    let items = seed_line_items();
    let discounts = seed_discounts();

    assert_eq!(compute_subtotal(&items), dec!(13500));
    assert_eq!(compute_discount_total(&items, &discounts), dec!(3350));
    assert_eq!(compute_total(&items, &discounts), dec!(10150));
}

#[test]
fn test_quantity_edit_updates_subtotal() {
    let items = seed_line_items();
    let updated = update_quantity(&items, "3", 3);

    assert_eq!(updated[2].quantity, 3);
    assert_eq!(compute_subtotal(&updated), dec!(18500));
    // Input snapshot is untouched
    assert_eq!(items[2].quantity, 2);
}

#[test]
fn test_quantity_edit_changes_percentage_discount() {
    let discounts = seed_discounts();
    let updated = update_quantity(&seed_line_items(), "3", 3);
    // 10% of 18500 + 2000
    assert_eq!(compute_discount_total(&updated, &discounts), dec!(3850));
    assert_eq!(compute_total(&updated, &discounts), dec!(14650));
}

#[test]
fn test_add_discount_appends_third_entry() {
    let discounts = seed_discounts();
    let updated = add_discount(&discounts, NewDiscount::fixed(dec!(500), "Promo"));

    assert_eq!(updated.len(), 3);
    assert_eq!(updated[2].id, "3");
    assert_eq!(updated[2].kind, DiscountKind::Fixed);
    assert_eq!(updated[2].value, dec!(500));
    assert_eq!(updated[2].description, "Promo");
    assert_eq!(&updated[..2], &discounts[..]);
}

// =============================================================================
// COST ESTIMATES
// =============================================================================

#[test]
fn test_general_surgery_full_selection() {
    let catalog = ProcedureCatalog::standard();
    let selection = Selection::new()
        .with("room", "private")
        .with("duration", "2-4 hours");

    assert_eq!(estimate_total(catalog.find("surgery1"), &selection), dec!(75000));
}

#[test]
fn test_consultation_without_selection() {
    let catalog = ProcedureCatalog::standard();
    assert_eq!(
        estimate_total(catalog.find("consultation1"), &Selection::new()),
        dec!(2000)
    );
}

#[test]
fn test_no_procedure_selected() {
    assert_eq!(estimate_total(None, &Selection::new()), Decimal::ZERO);
}

#[test]
fn test_estimator_state_walkthrough() {
    let catalog = ProcedureCatalog::standard();

    let state = EstimatorState::new();
    assert_eq!(state.total(&catalog), Decimal::ZERO);

    let state = state.with_procedure("surgery1");
    assert_eq!(state.total(&catalog), dec!(50000));

    let state = state.with_choice("room", "private").with_choice("duration", "2-4 hours");
    assert_eq!(state.total(&catalog), dec!(75000));

    let state = state.with_procedure("consultation1");
    assert!(state.selection.is_empty());
    assert_eq!(state.total(&catalog), dec!(2000));
}

// =============================================================================
// SERVICE
// =============================================================================

#[test]
fn test_invoice_flow_through_service() {
    let service = BillingService::new(BillingPolicy::default());

    let draft = InvoiceDraft::seeded().with_patient("John Doe");
    let draft = service.update_quantity(draft, "3", "3").unwrap();
    let draft = service
        .add_discount(draft, NewDiscount::fixed(dec!(500), "Promo"))
        .unwrap();

    let totals = service.invoice_totals(&draft).unwrap();
    assert_eq!(totals.subtotal, dec!(18500));
    assert_eq!(totals.discount_total, dec!(4350));
    assert_eq!(totals.total, dec!(14150));

    assert!(service.create_invoice(draft.clone()).is_err());

    let invoice = service
        .create_invoice(draft.with_payment_method(PaymentMethod::DigitalWallet))
        .unwrap();
    assert_eq!(invoice.totals, totals);
    assert_eq!(invoice.discounts[2].id, "3");
}

#[test]
fn test_invoice_serializes_amounts_as_strings() {
    let invoice = InvoiceDraft::seeded()
        .with_patient("Jane Smith")
        .with_payment_method(PaymentMethod::Cash)
        .submit(&BillingPolicy::default())
        .unwrap();

    let json = serde_json::to_value(&invoice).unwrap();
    assert_eq!(json["payment_method"], "cash");
    assert_eq!(json["status"], "pending");
    let total: Decimal = json["totals"]["total"].as_str().unwrap().parse().unwrap();
    assert_eq!(total, dec!(10150));
}
}
