use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use rust_decimal::Decimal;

/// Billing back-office command line
#[derive(Parser, Debug)]
#[command(name = "rustcare")]
#[command(about = "Invoice totals, cost estimates, insurance claims and revenue dashboard")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "RUSTCARE_CONFIG", default_value = "rustcare.yaml")]
    pub config: PathBuf,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parses the process arguments, exiting with usage on error.
    pub fn parse_ordered() -> Self {
        match Self::try_parse_ordered(std::env::args_os()) {
            Ok(cli) => cli,
            Err(err) => err.exit(),
        }
    }

    /// Like [`Parser::try_parse_from`], but also records the command-line
    /// order of repeated discount flags.
    pub fn try_parse_ordered<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;
        if let (Command::Invoice(invoice), Some(("invoice", sub))) =
            (&mut cli.command, matches.subcommand())
        {
            invoice.record_discount_order(sub);
        }
        Ok(cli)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the invoice draft totals, optionally issuing the invoice
    Invoice(InvoiceArgs),
    /// Estimate the cost of a procedure
    Estimate(EstimateArgs),
    /// List the procedure catalog
    Procedures,
    /// List and search insurance claims
    Claims(ClaimsArgs),
    /// Revenue summary and recent activity
    Dashboard,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Invoice(_) => "invoice",
            Command::Estimate(_) => "estimate",
            Command::Procedures => "procedures",
            Command::Claims(_) => "claims",
            Command::Dashboard => "dashboard",
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct InvoiceArgs {
    /// Line item quantity edit, ITEM_ID=QUANTITY (repeatable)
    #[arg(long = "set-quantity", value_name = "ID=QTY")]
    pub quantities: Vec<KeyValue>,

    /// Percentage discount, PERCENT:DESCRIPTION (repeatable)
    #[arg(long = "percent-discount", value_name = "PCT:DESC")]
    pub percent_discounts: Vec<DiscountArg>,

    /// Flat discount, AMOUNT:DESCRIPTION (repeatable)
    #[arg(long = "fixed-discount", value_name = "AMT:DESC")]
    pub fixed_discounts: Vec<DiscountArg>,

    /// Patient name; together with --payment-method issues the invoice
    #[arg(long)]
    pub patient: Option<String>,

    /// credit-card, bank-transfer, cash or digital-wallet
    #[arg(long)]
    pub payment_method: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Discount flags in command-line order
    #[arg(skip)]
    pub discount_order: Vec<DiscountFlag>,
}

/// Which discount flag a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountFlag {
    Percent,
    Fixed,
}

impl InvoiceArgs {
    fn record_discount_order(&mut self, matches: &ArgMatches) {
        let mut indexed: Vec<(usize, DiscountFlag)> = Vec::new();
        for (id, flag) in [
            ("percent_discounts", DiscountFlag::Percent),
            ("fixed_discounts", DiscountFlag::Fixed),
        ] {
            if let Ok(true) = matches.try_contains_id(id) {
                if let Some(indices) = matches.indices_of(id) {
                    indexed.extend(indices.map(|index| (index, flag)));
                }
            }
        }
        indexed.sort_by_key(|(index, _)| *index);
        self.discount_order = indexed.into_iter().map(|(_, flag)| flag).collect();
    }

    /// Discounts in the order they were given. Without a recorded order,
    /// percentage discounts come before flat ones.
    pub fn discounts(&self) -> Vec<(DiscountFlag, &DiscountArg)> {
        let expected = self.percent_discounts.len() + self.fixed_discounts.len();
        let order: Vec<DiscountFlag> = if self.discount_order.len() == expected {
            self.discount_order.clone()
        } else {
            std::iter::repeat(DiscountFlag::Percent)
                .take(self.percent_discounts.len())
                .chain(std::iter::repeat(DiscountFlag::Fixed).take(self.fixed_discounts.len()))
                .collect()
        };

        let mut percent = self.percent_discounts.iter();
        let mut fixed = self.fixed_discounts.iter();
        order
            .into_iter()
            .filter_map(|flag| match flag {
                DiscountFlag::Percent => percent.next().map(|arg| (flag, arg)),
                DiscountFlag::Fixed => fixed.next().map(|arg| (flag, arg)),
            })
            .collect()
    }
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Procedure id from `rustcare procedures`
    #[arg(short, long)]
    pub procedure: String,

    /// Option choice, VARIABLE=OPTION (repeatable)
    #[arg(short, long = "select", value_name = "VAR=OPTION")]
    pub selections: Vec<KeyValue>,
}

#[derive(Args, Debug, Default)]
pub struct ClaimsArgs {
    /// Case-insensitive text to search for
    #[arg(short, long)]
    pub search: Option<String>,

    /// in-review, approved or rejected
    #[arg(long)]
    pub status: Option<String>,
}

/// `KEY=VALUE` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl FromStr for KeyValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
        if key.trim().is_empty() {
            return Err(format!("missing key in '{}'", s));
        }
        Ok(Self {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// `VALUE:DESCRIPTION` discount argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountArg {
    pub value: Decimal,
    pub description: String,
}

impl FromStr for DiscountArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, description) = s
            .split_once(':')
            .ok_or_else(|| format!("expected VALUE:DESCRIPTION, got '{}'", s))?;
        let value = Decimal::from_str(value.trim())
            .map_err(|e| format!("invalid discount value '{}': {}", value, e))?;
        Ok(Self {
            value,
            description: description.trim().to_string(),
        })
    }
}
