//! Goal CLI commands
//!
//! `goal` answers one-off questions about a single goal; `goals` analyzes a
//! whole file of goals for health and conflicts.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde_json::json;

use super::input::{load_document, GoalsDocument};
use super::{parse_amount, parse_date, CliContext};
use crate::display::{format_goal_alerts, format_warnings};
use crate::error::{PlanError, PlanResult};
use crate::models::{Goal, Money};
use crate::services::{GoalEstimator, GoalGuardian};

/// Goal subcommands
#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Estimate when a goal will be reached
    Estimate {
        /// Target amount
        #[arg(short, long)]
        target: String,
        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        current: String,
        /// Monthly contribution
        #[arg(short, long)]
        monthly: String,
    },

    /// Monthly contribution needed to reach a goal by a date
    Required {
        /// Target amount
        #[arg(short, long)]
        target: String,
        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        current: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        by: String,
    },

    /// Classify a goal from its target date and estimate
    Health {
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        target_date: Option<String>,
        /// Estimated completion date (YYYY-MM-DD)
        #[arg(short, long)]
        estimated: Option<String>,
    },
}

/// Arguments for analyzing a file of goals
#[derive(Args, Debug)]
pub struct GoalsArgs {
    /// JSON or YAML file with a `goals` list
    pub file: PathBuf,
    /// Balance available for goals each month; the over-allocation check
    /// is skipped when omitted
    #[arg(short, long)]
    pub available: Option<String>,
    /// Recompute every goal's estimate before analyzing
    #[arg(short, long)]
    pub refresh: bool,
}

/// Handle a `goal` subcommand
pub fn handle_goal_command(ctx: &CliContext, cmd: GoalCommands) -> PlanResult<()> {
    let estimator = GoalEstimator::from_settings(&ctx.settings, &ctx.clock);

    match cmd {
        GoalCommands::Estimate {
            target,
            current,
            monthly,
        } => {
            let target = parse_amount(&target)?;
            let current = parse_amount(&current)?;
            let monthly = parse_amount(&monthly)?;
            let estimate = estimator.estimate_completion(target, current, monthly);

            if ctx.json {
                return ctx.print_json(&json!({ "estimatedDate": estimate }));
            }
            match estimate {
                Some(date) => println!("Estimated completion: {}", date),
                None => println!("No estimate: the monthly contribution must be greater than zero."),
            }
        }

        GoalCommands::Required {
            target,
            current,
            by,
        } => {
            let target = parse_amount(&target)?;
            let current = parse_amount(&current)?;
            let by = parse_date(&by)?;
            let required = estimator.required_monthly_allocation(target, current, by);

            if ctx.json {
                return ctx.print_json(&json!({ "requiredMonthlyCents": required }));
            }
            println!(
                "Required monthly contribution: {}",
                required.format_with_symbol(ctx.symbol())
            );
        }

        GoalCommands::Health {
            target_date,
            estimated,
        } => {
            let target_date = target_date.as_deref().map(parse_date).transpose()?;
            let estimated = estimated.as_deref().map(parse_date).transpose()?;
            let health = estimator.health_status(target_date, estimated);

            if ctx.json {
                return ctx.print_json(&json!({ "health": health }));
            }
            println!("Goal health: {}", health);
        }
    }

    Ok(())
}

/// Handle the `goals` command
pub fn handle_goals_command(ctx: &CliContext, args: GoalsArgs) -> PlanResult<()> {
    let document: GoalsDocument = load_document(&args.file)?;

    for goal in &document.goals {
        goal.validate()
            .map_err(|e| PlanError::Validation(format!("Goal '{}': {}", goal.id, e)))?;
    }

    let goals: Vec<Goal> = if args.refresh {
        let estimator = GoalEstimator::from_settings(&ctx.settings, &ctx.clock);
        document.goals.iter().map(|g| estimator.refresh(g)).collect()
    } else {
        document.goals
    };

    let available = match args.available.as_deref() {
        Some(s) => parse_amount(s)?,
        None => goals.iter().map(|g| g.allocation_or_zero()).sum::<Money>(),
    };

    let guardian = GoalGuardian::from_settings(&ctx.settings);
    let alerts = guardian.analyze_health(&goals);
    let conflicts = guardian.check_conflicts(&goals, available);

    if ctx.json {
        return ctx.print_json(&json!({
            "goals": goals,
            "alerts": alerts,
            "conflicts": conflicts,
        }));
    }

    println!("Goal health");
    println!("{}", "=".repeat(40));
    println!("{}", format_goal_alerts(&alerts).trim_end());
    println!();
    println!("Conflicts");
    println!("{}", "=".repeat(40));
    println!("{}", format_warnings(&conflicts).trim_end());

    Ok(())
}
