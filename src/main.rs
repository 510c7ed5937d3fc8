use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cashplan::cli::{
    handle_budget_command, handle_goal_command, handle_goals_command, handle_installments_command,
    handle_project_command, handle_split_command, parse_date, CliContext,
};
use cashplan::config::{CashplanPaths, Settings};

#[derive(Parser)]
#[command(
    name = "cashplan",
    version,
    about = "Installment, goal and cash-flow planning",
    long_about = "cashplan splits purchases into monthly installments, forecasts \
                  when savings goals will be reached, checks spending against \
                  budgets and projects the cash flow of the coming months."
)]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, env = "CASHPLAN_TODAY")]
    today: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a purchase into monthly installments
    #[command(alias = "inst")]
    Installments(cashplan::cli::InstallmentsArgs),

    /// Show how an amount splits into installments
    Split(cashplan::cli::SplitArgs),

    /// Estimates and health for a single goal
    #[command(subcommand)]
    Goal(cashplan::cli::GoalCommands),

    /// Analyze a file of goals for health and conflicts
    Goals(cashplan::cli::GoalsArgs),

    /// Check category spending against budgets
    Budget(cashplan::cli::BudgetArgs),

    /// Project the coming months
    #[command(alias = "projection")]
    Project(cashplan::cli::ProjectArgs),

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CashplanPaths::new()?;
    let settings = Settings::load_or_create(&paths).context("Failed to load settings")?;

    let mut clock = settings.clock()?;
    if let Some(today) = cli.today.as_deref() {
        clock = clock.pinned_to(parse_date(today)?);
    }

    let ctx = CliContext {
        paths: paths.clone(),
        settings,
        clock,
        json: cli.json,
    };

    match cli.command {
        Some(Commands::Installments(args)) => handle_installments_command(&ctx, args)?,
        Some(Commands::Split(args)) => handle_split_command(&ctx, args)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&ctx, cmd)?,
        Some(Commands::Goals(args)) => handle_goals_command(&ctx, args)?,
        Some(Commands::Budget(args)) => handle_budget_command(&ctx, args)?,
        Some(Commands::Project(args)) => handle_project_command(&ctx, args)?,
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Settings already exist at: {}", paths.settings_file().display());
            } else {
                ctx.settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
            }
        }
        Some(Commands::Config) => {
            if ctx.json {
                ctx.print_json(&ctx.settings)?;
            } else {
                let settings = &ctx.settings;
                println!("cashplan Configuration");
                println!("======================");
                println!("Config directory:  {}", paths.base_dir().display());
                println!("Settings file:     {}", paths.settings_file().display());
                println!("Exports directory: {}", paths.exports_dir().display());
                println!();
                println!("Settings:");
                println!("  Timezone:          {}", settings.timezone);
                println!("  Today:             {}", ctx.clock.today());
                println!("  Currency symbol:   {}", settings.currency_symbol);
                println!("  Months ahead:      {}", settings.default_months_ahead);
                println!("  At-risk grace:     {} days", settings.policy.at_risk_grace_days);
                println!(
                    "  At-risk delay:     up to {} months",
                    settings.policy.at_risk_max_months_delayed
                );
                println!("  Budget warning at: {}%", settings.policy.budget_warning_percent);
            }
        }
        None => {
            println!("cashplan - installment, goal and cash-flow planning");
            println!();
            println!("Run 'cashplan --help' for usage information.");
        }
    }

    Ok(())
}
