//! Budget CLI commands
//!
//! Setting and removing monthly category limits, and checking which ones
//! have been exceeded.

use clap::Subcommand;

use crate::display::{format_budget_alerts, format_budget_list};
use crate::error::PocketbookResult;
use crate::models::Money;
use crate::services::{BudgetService, Clock, PeriodService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the monthly limit for a category
    Set {
        /// Category label
        category: String,
        /// Monthly limit (e.g., "250" or "250.00")
        amount: String,
    },

    /// Remove a category's budget
    #[command(alias = "rm")]
    Remove {
        /// Category label
        category: String,
    },

    /// List all budgets
    #[command(alias = "ls")]
    List,

    /// Show categories that went over budget
    Alerts {
        /// Month to check (e.g., "2025-01", "January", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    clock: &dyn Clock,
    cmd: BudgetCommands,
) -> PocketbookResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let budget = service.set_limit(&category, Money::parse(&amount)?)?;
            println!("Budget set: {}", budget);
        }

        BudgetCommands::Remove { category } => {
            let budget = service.remove(&category)?;
            println!("Removed budget for {}", budget.category);
        }

        BudgetCommands::List => {
            print!("{}", format_budget_list(&service.list()?));
        }

        BudgetCommands::Alerts { period } => {
            let period = PeriodService::new(clock).parse_or_current(period.as_deref())?;
            println!("Budget alerts for {} {}", period.month_name(), period.year);
            print!("{}", format_budget_alerts(&service.alerts(period)?));
        }
    }

    Ok(())
}
