//! Installment CLI commands

use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use super::{create_output, parse_amount, parse_date, CliContext};
use crate::display::{format_schedule, format_split};
use crate::error::PlanResult;
use crate::export::export_schedule_csv;
use crate::models::{CategoryId, GoalId, InstallmentInput};
use crate::services::installment::{expand, split_amount};

/// Arguments for expanding a purchase into installments
#[derive(Args, Debug)]
pub struct InstallmentsArgs {
    /// Purchase description
    pub description: String,
    /// Total amount (e.g., "1200", "1.234,56")
    pub total: String,
    /// Number of installments
    pub count: u32,
    /// Date of the first installment (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub start: Option<String>,
    /// Billing day of month (1-31)
    #[arg(short, long)]
    pub day: Option<u32>,
    /// Category ID to attach to every installment
    #[arg(short, long)]
    pub category: Option<String>,
    /// Goal ID to attach to every installment
    #[arg(short, long)]
    pub goal: Option<String>,
    /// Also write the schedule as CSV (to PATH, or to the exports directory)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub csv: Option<Option<PathBuf>>,
}

/// Arguments for splitting an amount
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Total amount
    pub total: String,
    /// Number of installments
    pub count: u32,
}

/// Handle the `installments` command
pub fn handle_installments_command(ctx: &CliContext, args: InstallmentsArgs) -> PlanResult<()> {
    let total = parse_amount(&args.total)?;
    let start = match args.start.as_deref() {
        Some(s) => parse_date(s)?,
        None => ctx.clock.today(),
    };

    let mut input = InstallmentInput::new(args.description, total, args.count, start);
    if let Some(category) = args.category {
        input = input.with_category(CategoryId::new(category));
    }
    if let Some(goal) = args.goal {
        input = input.with_goal(GoalId::new(goal));
    }
    if let Some(day) = args.day {
        input = input.with_day_of_month(day);
    }

    let schedule = expand(&input)?;

    if let Some(requested) = args.csv {
        let path = ctx.csv_target(requested, "installments")?;
        export_schedule_csv(&schedule, create_output(&path)?)?;
        eprintln!("Schedule written to {}", path.display());
    }

    if ctx.json {
        ctx.print_json(&schedule)
    } else {
        print!("{}", format_schedule(&schedule, ctx.symbol()));
        Ok(())
    }
}

/// Handle the `split` command
pub fn handle_split_command(ctx: &CliContext, args: SplitArgs) -> PlanResult<()> {
    let total = parse_amount(&args.total)?;
    let split = split_amount(total, args.count)?;

    if ctx.json {
        ctx.print_json(&json!({
            "totalCents": total,
            "installments": args.count,
            "baseAmount": split.base,
            "firstAmount": split.first,
        }))
    } else {
        print!("{}", format_split(total, args.count, &split, ctx.symbol()));
        Ok(())
    }
}
