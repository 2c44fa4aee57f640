use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocketbook::cli::{
    handle_budget_command, handle_expense_command, handle_export_command, handle_report_command,
    handle_shared_command,
};
use pocketbook::config::{paths::PocketbookPaths, settings::Settings};
use pocketbook::services::SystemClock;
use pocketbook::storage::Storage;

/// Environment variable holding a tracing filter, e.g. `pocketbook=debug`
const LOG_ENV: &str = "POCKETBOOK_LOG";

#[derive(Parser)]
#[command(
    name = "pocketbook",
    version,
    about = "Personal expense tracking, budgets and shared-expense settlement",
    long_about = "Pocketbook records personal expenses and monthly budgets, shows \
                  where the money went month by month, and keeps track of who \
                  owes whom for expenses shared with other people."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Personal expense commands
    #[command(subcommand, alias = "exp")]
    Expense(pocketbook::cli::ExpenseCommands),

    /// Shared expense commands
    #[command(subcommand)]
    Shared(pocketbook::cli::SharedCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(pocketbook::cli::BudgetCommands),

    /// Dashboard and spending reports
    #[command(subcommand)]
    Report(pocketbook::cli::ReportCommands),

    /// Export records to CSV or JSON
    #[command(subcommand)]
    Export(pocketbook::cli::ExportCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PocketbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "storage loaded");

    let clock = SystemClock;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, &clock, cmd)?;
        }
        Some(Commands::Shared(cmd)) => {
            handle_shared_command(&storage, &settings, &clock, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &clock, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &clock, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Pocketbook at: {}", paths.base_dir().display());
            pocketbook::storage::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Record an expense with 'pocketbook expense add 12.50 Food'.");
        }
        Some(Commands::Config) => {
            println!("Pocketbook Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Log level:       {}", settings.log_level);
            println!("  Default sort:    {}", settings.default_sort);
        }
        None => {
            println!("Pocketbook - expenses, budgets and shared costs");
            println!();
            println!("Run 'pocketbook --help' for usage information.");
            println!("Run 'pocketbook report dashboard' for this year's dashboard.");
        }
    }

    Ok(())
}
