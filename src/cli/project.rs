//! Projection CLI command

use std::path::PathBuf;

use clap::Args;

use super::input::load_document;
use super::{create_output, CliContext};
use crate::display::format_projection;
use crate::error::{PlanError, PlanResult};
use crate::export::export_projection_csv;
use crate::models::ProjectionInput;
use crate::services::projection::MAX_MONTHS_AHEAD;
use crate::services::ProjectionCalculator;

/// Arguments for projecting future months
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// JSON or YAML projection input
    pub file: PathBuf,
    /// Number of months to project (overrides the file and settings)
    #[arg(short, long)]
    pub months: Option<u32>,
    /// Also write the projection as CSV (to PATH, or to the exports directory)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub csv: Option<Option<PathBuf>>,
}

/// Handle the `project` command
pub fn handle_project_command(ctx: &CliContext, args: ProjectArgs) -> PlanResult<()> {
    let mut input: ProjectionInput = load_document(&args.file)?;

    let months = args
        .months
        .or(input.months_ahead)
        .unwrap_or(ctx.settings.default_months_ahead);
    if !(1..=MAX_MONTHS_AHEAD).contains(&months) {
        return Err(PlanError::Validation(format!(
            "Months ahead must be between 1 and {}, got {}",
            MAX_MONTHS_AHEAD, months
        )));
    }
    input.months_ahead = Some(months);

    let calculator = ProjectionCalculator::new(&ctx.clock);
    let projection = calculator.calculate_input(&input, months);

    if let Some(requested) = args.csv {
        let path = ctx.csv_target(requested, "projection")?;
        export_projection_csv(&projection, create_output(&path)?)?;
        eprintln!("Projection written to {}", path.display());
    }

    if ctx.json {
        ctx.print_json(&projection)
    } else {
        print!("{}", format_projection(&projection, ctx.symbol()));
        Ok(())
    }
}
