//! Budget CLI command
//!
//! Reads a period's category spending and reports alerts, the budget
//! still available and suggested budget changes.

use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use super::input::{load_document, BudgetDocument};
use super::{parse_amount, CliContext};
use crate::display::{format_budget_alerts, format_suggestions};
use crate::error::PlanResult;
use crate::models::Money;
use crate::services::BudgetGuard;

/// Arguments for analyzing category spending
#[derive(Args, Debug)]
pub struct BudgetArgs {
    /// JSON or YAML file with a `categories` list
    pub file: PathBuf,
    /// Amount to free up from underused categories
    #[arg(short, long)]
    pub savings: Option<String>,
}

/// Handle the `budget` command
pub fn handle_budget_command(ctx: &CliContext, args: BudgetArgs) -> PlanResult<()> {
    let document: BudgetDocument = load_document(&args.file)?;
    let savings = match args.savings.as_deref() {
        Some(s) => parse_amount(s)?,
        None => Money::zero(),
    };

    let guard = BudgetGuard::from_settings(&ctx.settings);
    let alerts = guard.analyze_budget(&document.categories);
    let remaining = guard.remaining_budget(&document.categories);
    let suggestions = guard.suggest_adjustment(&document.categories, savings);

    if ctx.json {
        return ctx.print_json(&json!({
            "alerts": alerts,
            "remainingBudgetCents": remaining,
            "suggestions": suggestions,
        }));
    }

    let symbol = ctx.symbol();
    println!("Budget alerts");
    println!("{}", "=".repeat(40));
    println!("{}", format_budget_alerts(&alerts, symbol).trim_end());
    println!();
    println!("Remaining budget: {}", remaining.format_with_symbol(symbol));
    println!();
    println!(
        "{}",
        format_suggestions(&suggestions, &document.categories, symbol).trim_end()
    );

    Ok(())
}
