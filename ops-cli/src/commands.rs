use std::fmt::Write as _;
use std::io::Write;

use anyhow::Context;

use billing_service::{
    line_amount, BillingReports, BillingService, Discount, DiscountKind, EstimateBreakdown,
    Invoice, InvoiceDraft, InvoiceRecord, InvoiceTotals, LineItem, NewDiscount, PaymentMethod,
    Procedure, RevenueSummary, Selection, Transaction,
};
use colored::Colorize;
use error_common::{Result, RustCareError};
use insurance_service::{Claim, ClaimRegistry, ClaimStatus, ClaimSummary};
use logger_redacted::{PiiRedactor, RedactionConfig};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cli::{ClaimsArgs, Cli, Command, DiscountFlag, EstimateArgs, InvoiceArgs};
use crate::config::AppConfig;

const RECENT_LIMIT: usize = 4;

/// Runs the selected command and returns the rendered output.
pub fn run(cli: &Cli, config: &AppConfig) -> Result<String> {
    let service = BillingService::new(config.billing);
    let redactor = PiiRedactor::new(RedactionConfig::from_logger_config(&config.logging));

    match &cli.command {
        Command::Invoice(args) => invoice(&service, args, cli.json),
        Command::Estimate(args) => estimate(&service, args, cli.json),
        Command::Procedures => procedures(&service, cli.json),
        Command::Claims(args) => claims(&ClaimRegistry::seeded(redactor), args, cli.json),
        Command::Dashboard => dashboard(&ClaimRegistry::seeded(redactor), cli.json),
    }
}

/// Writes rendered output; JSON gets a trailing newline.
pub fn write_output<W: Write>(writer: &mut W, output: &str, json: bool) -> Result<()> {
    fn write_all<W: Write>(writer: &mut W, output: &str, json: bool) -> std::io::Result<()> {
        writer.write_all(output.as_bytes())?;
        if json {
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    write_all(writer, output, json).context("Failed to write command output")?;
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| RustCareError::InternalError(e.to_string()))
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

// ============================================================================
// INVOICE
// ============================================================================

#[derive(Debug, Serialize)]
struct InvoiceReport {
    items: Vec<LineItem>,
    discounts: Vec<Discount>,
    totals: InvoiceTotals,
    invoice: Option<Invoice>,
}

fn invoice(service: &BillingService, args: &InvoiceArgs, json: bool) -> Result<String> {
    let mut draft = InvoiceDraft::seeded();

    for edit in &args.quantities {
        draft = service.update_quantity(draft, &edit.key, &edit.value)?;
    }
    for (flag, arg) in args.discounts() {
        let discount = match flag {
            DiscountFlag::Percent => NewDiscount::percentage(arg.value, arg.description.clone()),
            DiscountFlag::Fixed => NewDiscount::fixed(arg.value, arg.description.clone()),
        };
        draft = service.add_discount(draft, discount)?;
    }

    if let Some(patient) = &args.patient {
        draft = draft.with_patient(patient.clone());
    }
    if let Some(description) = &args.description {
        draft = draft.with_description(description.clone());
    }
    if let Some(method) = &args.payment_method {
        draft = draft.with_payment_method(method.parse::<PaymentMethod>()?);
    }

    let totals = service.invoice_totals(&draft)?;
    let submit = args.patient.is_some() || args.payment_method.is_some();
    let report = InvoiceReport {
        items: draft.items.clone(),
        discounts: draft.discounts.clone(),
        totals,
        invoice: if submit { Some(service.create_invoice(draft)?) } else { None },
    };

    if json {
        return to_json(&report);
    }
    Ok(render_invoice(&report))
}

fn render_invoice(report: &InvoiceReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Billing Details".bold());
    for item in &report.items {
        let _ = writeln!(
            out,
            "  {:<3} {:<26} {:<14} {:>3} x {:>10} = {:>12}",
            item.id,
            item.description,
            item.category,
            item.quantity,
            money(item.unit_price),
            money(line_amount(item))
        );
    }

    let _ = writeln!(out, "{}", "Discounts & Adjustments".bold());
    for discount in &report.discounts {
        let shown = match discount.kind {
            DiscountKind::Percentage => format!("-{}%", discount.value),
            DiscountKind::Fixed => format!("-{}", money(discount.value)),
        };
        let _ = writeln!(out, "  {:<3} {:<40} {:>14}", discount.id, discount.description, shown.green());
    }

    let totals = &report.totals;
    let _ = writeln!(out, "{:<20} {:>14}", "Subtotal", money(totals.subtotal));
    let _ = writeln!(out, "{:<20} {:>14}", "Total Discounts", format!("-{}", money(totals.discount_total)));
    let _ = writeln!(out, "{:<20} {:>14}", "Total Amount".bold(), money(totals.total));

    if let Some(invoice) = &report.invoice {
        let _ = writeln!(
            out,
            "{} {} for {} ({})",
            "Invoice created:".green(),
            invoice.invoice_number,
            invoice.patient_name,
            invoice.payment_method
        );
    }
    out
}

// ============================================================================
// ESTIMATE
// ============================================================================

fn estimate(service: &BillingService, args: &EstimateArgs, json: bool) -> Result<String> {
    let selection: Selection = args
        .selections
        .iter()
        .map(|kv| (kv.key.clone(), kv.value.clone()))
        .collect();
    let breakdown = service.estimate(&args.procedure, &selection)?;

    if json {
        return to_json(&breakdown);
    }
    Ok(render_estimate(&breakdown))
}

fn render_estimate(breakdown: &EstimateBreakdown) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", breakdown.procedure_name.bold(), breakdown.procedure_id);
    let _ = writeln!(out, "  {:<36} {:>12}", "Base Price", money(breakdown.base_price));
    for line in &breakdown.lines {
        let label = format!(
            "{}: {}",
            line.variable_name,
            line.option.as_deref().unwrap_or("-")
        );
        let _ = writeln!(out, "  {:<36} {:>12}", label, format!("+{}", money(line.surcharge)));
    }
    let _ = writeln!(out, "  {:<36} {:>12}", "Estimated Total".bold(), money(breakdown.total));
    let _ = writeln!(
        out,
        "* This is an estimate. Final costs may vary based on actual procedure requirements and complications."
    );
    out
}

// ============================================================================
// PROCEDURES
// ============================================================================

fn procedures(service: &BillingService, json: bool) -> Result<String> {
    let procedures: Vec<&Procedure> = service.catalog().iter().collect();
    if json {
        return to_json(&procedures);
    }

    let mut out = String::new();
    for procedure in procedures {
        let _ = writeln!(
            out,
            "{} {} (base {})",
            procedure.id.bold(),
            procedure.name,
            money(procedure.base_price)
        );
        for variable in &procedure.variables {
            let options: Vec<String> = variable
                .options
                .iter()
                .map(|option| format!("{} +{}", option.value, money(option.price)))
                .collect();
            let _ = writeln!(out, "  {} [{}]: {}", variable.name, variable.id, options.join(", "));
        }
    }
    Ok(out)
}

// ============================================================================
// CLAIMS
// ============================================================================

#[derive(Debug, Serialize)]
struct ClaimsReport<'a> {
    claims: Vec<&'a Claim>,
    summary: ClaimSummary,
}

fn claims(registry: &ClaimRegistry, args: &ClaimsArgs, json: bool) -> Result<String> {
    let status = args
        .status
        .as_deref()
        .map(str::parse::<ClaimStatus>)
        .transpose()?;

    let matched: Vec<&Claim> = registry
        .search(args.search.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|claim| status.map_or(true, |s| claim.status == s))
        .collect();
    let report = ClaimsReport {
        summary: insurance_service::summarize(matched.iter().copied()),
        claims: matched,
    };

    if json {
        return to_json(&report);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", "Insurance Claims".bold());
    for claim in &report.claims {
        let _ = writeln!(
            out,
            "  #{} {:<14} {:>10} {:<10} {:<22} {:<13} {}",
            claim.id,
            claim.patient_name,
            money(claim.amount),
            claim.status,
            claim.insurance_provider,
            claim.policy_number,
            claim.submitted_date
        );
        let _ = writeln!(out, "        {}", claim.description);
    }
    let summary = &report.summary;
    let _ = writeln!(
        out,
        "{} claims, {} total: {} in review, {} approved, {} rejected",
        summary.total_claims,
        money(summary.total_amount),
        summary.in_review,
        summary.approved,
        summary.rejected
    );
    Ok(out)
}

// ============================================================================
// DASHBOARD
// ============================================================================

#[derive(Debug, Serialize)]
struct DashboardReport {
    revenue: RevenueSummary,
    pending_claims: usize,
    outstanding_invoices: Decimal,
    recent_transactions: Vec<Transaction>,
    recent_invoices: Vec<InvoiceRecord>,
}

fn dashboard(registry: &ClaimRegistry, json: bool) -> Result<String> {
    let transactions = billing_service::seed_transactions();
    let invoices = billing_service::seed_recent_invoices();
    let report = DashboardReport {
        revenue: BillingReports::summarize(&transactions),
        pending_claims: registry.summary().in_review,
        outstanding_invoices: BillingReports::outstanding_invoices(&invoices),
        recent_transactions: BillingReports::recent(&transactions, RECENT_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        recent_invoices: invoices,
    };

    if json {
        return to_json(&report);
    }

    let revenue = &report.revenue;
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Financial Dashboard".bold());
    let _ = writeln!(out, "  {:<22} {:>14}", "Total Billed", money(revenue.total_billed));
    let _ = writeln!(out, "  {:<22} {:>14}", "Collected", money(revenue.collected));
    let _ = writeln!(out, "  {:<22} {:>14}", "Outstanding", money(revenue.outstanding));
    let _ = writeln!(out, "  {:<22} {:>13}%", "Collection Rate", revenue.collection_rate_percent);
    let _ = writeln!(out, "  {:<22} {:>14}", "Pending Claims", report.pending_claims);
    let _ = writeln!(out, "  {:<22} {:>14}", "Unpaid Invoices", money(report.outstanding_invoices));

    let _ = writeln!(out, "{}", "Recent Transactions".bold());
    for t in &report.recent_transactions {
        let _ = writeln!(out, "  {} {:<14} {:>12} {:?}", t.date, t.patient, money(t.amount), t.status);
    }
    let _ = writeln!(out, "{}", "Recent Invoices".bold());
    for invoice in &report.recent_invoices {
        let _ = writeln!(
            out,
            "  #{} {:<14} {:>12} {:?} (issued {}, due in {} days)",
            invoice.id,
            invoice.patient,
            money(invoice.amount),
            invoice.status,
            invoice.issued_on,
            invoice.due_in_days
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{DiscountArg, KeyValue};
    use billing_service::{BillingPolicy, NegativeTotalPolicy};
    use rust_decimal_macros::dec;

    fn cli(command: Command, json: bool) -> Cli {
        colored::control::set_override(false);
        Cli {
            config: "rustcare.yaml".into(),
            json,
            verbose: false,
            command,
        }
    }

    fn kv(key: &str, value: &str) -> KeyValue {
        KeyValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_output_terminates_json() {
        let mut buffer = Vec::new();
        write_output(&mut buffer, "{}", true).unwrap();
        write_output(&mut buffer, "text\n", false).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{}\ntext\n");
    }

    #[test]
    fn test_write_output_failure_is_internal_error() {
        let err = write_output(&mut ClosedPipe, "report", false).unwrap_err();
        assert_eq!(err.error_type(), "internal");
        assert_eq!(err.to_string(), "Failed to write command output");
    }

    #[test]
    fn test_invoice_discounts_follow_command_line_order() {
        let parsed = Cli::try_parse_ordered([
            "rustcare",
            "--json",
            "invoice",
            "--fixed-discount",
            "500:Promo",
            "--percent-discount",
            "5:Staff",
        ])
        .unwrap();
        let output = run(&parsed, &AppConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["discounts"][2]["id"], "3");
        assert_eq!(value["discounts"][2]["description"], "Promo");
        assert_eq!(value["discounts"][3]["id"], "4");
        assert_eq!(value["discounts"][3]["description"], "Staff");
    }

    #[test]
    fn test_invoice_oversized_discount_is_business_error() {
        let args = InvoiceArgs {
            fixed_discounts: vec![DiscountArg {
                value: Decimal::MAX,
                description: "Waiver".to_string(),
            }],
            ..Default::default()
        };
        let err = run(&cli(Command::Invoice(args), false), &AppConfig::default()).unwrap_err();
        assert_eq!(err.error_type(), "business");
        assert!(err.to_string().contains("exceeds the representable amount"));
    }

    #[test]
    fn test_invoice_text_shows_totals() {
        let output = run(&cli(Command::Invoice(InvoiceArgs::default()), false), &AppConfig::default()).unwrap();
        assert!(output.contains("13500.00"));
        assert!(output.contains("-3350.00"));
        assert!(output.contains("10150.00"));
        assert!(!output.contains("Invoice created"));
    }

    #[test]
    fn test_invoice_json_with_edits() {
        let args = InvoiceArgs {
            quantities: vec![kv("3", "3")],
            fixed_discounts: vec![DiscountArg {
                value: dec!(500),
                description: "Promo".to_string(),
            }],
            ..Default::default()
        };
        let output = run(&cli(Command::Invoice(args), true), &AppConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let subtotal: Decimal = value["totals"]["subtotal"].as_str().unwrap().parse().unwrap();
        assert_eq!(subtotal, dec!(18500));
        assert_eq!(value["discounts"][2]["id"], "3");
        assert!(value["invoice"].is_null());
    }

    #[test]
    fn test_invoice_submission_requires_payment_method() {
        let args = InvoiceArgs {
            patient: Some("John Doe".to_string()),
            ..Default::default()
        };
        let err = run(&cli(Command::Invoice(args), false), &AppConfig::default()).unwrap_err();
        assert_eq!(err.error_type(), "validation");
        assert!(err.to_string().contains("Please select a payment method"));
    }

    #[test]
    fn test_invoice_submission() {
        let args = InvoiceArgs {
            patient: Some("John Doe".to_string()),
            payment_method: Some("cash".to_string()),
            ..Default::default()
        };
        let output = run(&cli(Command::Invoice(args), false), &AppConfig::default()).unwrap();
        assert!(output.contains("Invoice created: INV-"));
        assert!(output.contains("(Cash)"));
    }

    #[test]
    fn test_invoice_respects_configured_policy() {
        let config = AppConfig {
            billing: BillingPolicy {
                negative_total: NegativeTotalPolicy::Reject,
                ..Default::default()
            },
            ..Default::default()
        };
        let args = InvoiceArgs {
            fixed_discounts: vec![DiscountArg {
                value: dec!(50000),
                description: "Waiver".to_string(),
            }],
            ..Default::default()
        };
        let err = run(&cli(Command::Invoice(args), false), &config).unwrap_err();
        assert_eq!(err.error_type(), "business");
    }

    #[test]
    fn test_estimate_text() {
        let args = EstimateArgs {
            procedure: "surgery1".to_string(),
            selections: vec![kv("room", "private"), kv("duration", "2-4 hours")],
        };
        let output = run(&cli(Command::Estimate(args), false), &AppConfig::default()).unwrap();
        assert!(output.contains("General Surgery (surgery1)"));
        assert!(output.contains("Room Type: private"));
        assert!(output.contains("75000.00"));
    }

    #[test]
    fn test_estimate_unknown_procedure() {
        let args = EstimateArgs {
            procedure: "dialysis".to_string(),
            selections: vec![],
        };
        let err = run(&cli(Command::Estimate(args), false), &AppConfig::default()).unwrap_err();
        assert_eq!(err.error_type(), "not_found");
    }

    #[test]
    fn test_claims_filtered_by_status() {
        let args = ClaimsArgs {
            search: Some("insurance".to_string()),
            status: Some("in-review".to_string()),
        };
        let output = run(&cli(Command::Claims(args), true), &AppConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["claims"].as_array().unwrap().len(), 2);
        assert_eq!(value["summary"]["in_review"], 2);
    }

    #[test]
    fn test_claims_bad_status() {
        let args = ClaimsArgs {
            search: None,
            status: Some("lost".to_string()),
        };
        let err = run(&cli(Command::Claims(args), false), &AppConfig::default()).unwrap_err();
        assert_eq!(err.error_type(), "validation");
    }

    #[test]
    fn test_dashboard_json() {
        let output = run(&cli(Command::Dashboard, true), &AppConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["pending_claims"], 2);
        assert_eq!(value["recent_transactions"].as_array().unwrap().len(), 4);
        assert_eq!(value["recent_transactions"][0]["patient"], "John Doe");
    }

    #[test]
    fn test_procedures_listing() {
        let output = run(&cli(Command::Procedures, false), &AppConfig::default()).unwrap();
        assert!(output.contains("surgery1 General Surgery"));
        assert!(output.contains("Specialist Type [specialist]"));
    }
}
