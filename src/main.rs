use anyhow::Result;
use clap::{Parser, Subcommand};

use profit_calc::cli::{
    handle_config_command, handle_effort_command, handle_log_command, handle_products_command,
    handle_review_command, handle_scenario_command, handle_summary_command, CommandContext,
    ConfigCommands, LogArgs, PlanArgs, ReviewArgs, ScenarioArgs, SummaryArgs,
};
use profit_calc::config::{ProfitPaths, Settings};

#[derive(Parser)]
#[command(
    name = "profit",
    author = "Kaylee Beyene",
    version,
    about = "Project profitability summaries and Best/Worst case scenarios",
    long_about = "profit-calc rolls a project's labor, product and expense plan up \
                  into a profit-and-loss summary, and evaluates Best/Worst case \
                  operating-profit scenarios from revenue, cost and effort estimates."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Profitability summary of a plan
    Summary(SummaryArgs),

    /// Operating-profit waterfall for a single case
    Scenario(ScenarioArgs),

    /// Worst and Best cases side by side
    Review(ReviewArgs),

    /// Product plan with margins, discounts and subtotals
    #[command(alias = "product")]
    Products(PlanArgs),

    /// Company and outsourced person-months per month
    Effort(PlanArgs),

    /// Show recent journaled calculations
    Log(LogArgs),

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ProfitPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ctx = CommandContext::new(paths, settings);

    match cli.command {
        Some(Commands::Summary(args)) => handle_summary_command(&ctx, args)?,
        Some(Commands::Scenario(args)) => handle_scenario_command(&ctx, args)?,
        Some(Commands::Review(args)) => handle_review_command(&ctx, args)?,
        Some(Commands::Products(args)) => handle_products_command(&ctx, args)?,
        Some(Commands::Effort(args)) => handle_effort_command(&ctx, args)?,
        Some(Commands::Log(args)) => handle_log_command(&ctx, args)?,
        Some(Commands::Config { command }) => {
            handle_config_command(&ctx, command.unwrap_or(ConfigCommands::Show))?
        }
        None => {
            println!("profit-calc - Project profitability calculator");
            println!();
            println!("Run 'profit --help' for usage information.");
            println!("Run 'profit summary <plan.json>' to summarize a plan.");
        }
    }

    Ok(())
}
