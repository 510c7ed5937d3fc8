//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod goal;
pub mod input;
pub mod installment;
pub mod project;

pub use budget::{handle_budget_command, BudgetArgs};
pub use goal::{handle_goal_command, handle_goals_command, GoalCommands, GoalsArgs};
pub use installment::{handle_installments_command, handle_split_command, InstallmentsArgs, SplitArgs};
pub use project::{handle_project_command, ProjectArgs};

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{CashplanPaths, Settings};
use crate::error::{PlanError, PlanResult};
use crate::models::{Clock, Money};

/// Everything a command handler needs besides its own arguments
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: CashplanPaths,
    pub settings: Settings,
    pub clock: Clock,
    /// Print machine-readable JSON instead of tables
    pub json: bool,
}

impl CliContext {
    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Print a value as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> PlanResult<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Where a CSV export goes: the given path, or a dated file in the
    /// exports directory
    pub fn csv_target(&self, requested: Option<PathBuf>, stem: &str) -> PlanResult<PathBuf> {
        match requested {
            Some(path) => Ok(path),
            None => {
                self.paths.ensure_directories()?;
                Ok(self
                    .paths
                    .exports_dir()
                    .join(format!("{}-{}.csv", stem, self.clock.today())))
            }
        }
    }
}

/// Open a file for CSV output
pub fn create_output(path: &Path) -> PlanResult<BufWriter<File>> {
    let file = File::create(path)
        .map_err(|e| PlanError::Io(format!("Failed to create {}: {}", path.display(), e)))?;
    Ok(BufWriter::new(file))
}

/// Parse a user-typed amount such as "10.50" or "R$ 1.234,56"
pub fn parse_amount(s: &str) -> PlanResult<Money> {
    Money::parse(s).map_err(|e| PlanError::Validation(e.to_string()))
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> PlanResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        PlanError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD format", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("R$ 1.234,56").unwrap().cents(), 123456);
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date("28/02/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }
}
