//! CLI commands for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{PocketbookError, PocketbookResult};
use crate::export::{csv, json};
use crate::storage::{ExpenseQuery, RecordSource, SharedQuery, SortOrder, Storage};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export every record to a JSON file
    All {
        /// Output file path
        output: PathBuf,
    },

    /// Export all expenses, deleted ones included, to CSV
    Expenses {
        /// Output file path
        output: PathBuf,
    },

    /// Export all shared expenses to CSV
    Shared {
        /// Output file path
        output: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> PocketbookResult<()> {
    match cmd {
        ExportCommands::All { output } => {
            let mut writer = create_file(&output)?;
            json::export_full_json(storage, &mut writer)?;
            writer.flush()?;
            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Expenses { output } => {
            let expenses =
                storage.query_expenses(&ExpenseQuery::new().everything(), SortOrder::Oldest)?;
            csv::export_expenses_csv(&expenses, create_file(&output)?)?;
            println!("Exported {} expenses to: {}", expenses.len(), output.display());
        }

        ExportCommands::Shared { output } => {
            let records = storage.query_shared(&SharedQuery::new(), SortOrder::Oldest)?;
            csv::export_shared_csv(&records, create_file(&output)?)?;
            println!(
                "Exported {} shared expenses to: {}",
                records.len(),
                output.display()
            );
        }

        ExportCommands::Info => {
            let export = json::FullExport::from_storage(storage)?;

            println!("Export Information");
            println!("==================\n");
            println!("Schema Version: {}", export.schema_version);
            println!("App Version:    {}", export.app_version);
            println!();
            println!("Data Summary:");
            println!("  Expenses:        {}", export.metadata.expense_count);
            println!("  Shared Expenses: {}", export.metadata.shared_expense_count);
            println!("  Budgets:         {}", export.metadata.budget_count);

            if let Some(earliest) = &export.metadata.earliest_expense {
                println!();
                println!("Expense Date Range:");
                println!("  Earliest: {}", earliest);
            }
            if let Some(latest) = &export.metadata.latest_expense {
                println!("  Latest:   {}", latest);
            }
        }
    }

    Ok(())
}

fn create_file(path: &Path) -> PocketbookResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        PocketbookError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
