//! Expense CLI commands
//!
//! Recording, listing, exporting and deleting personal expenses.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{PocketbookError, PocketbookResult};
use crate::export::export_expenses_csv;
use crate::models::{parse_date, validate_month, Money};
use crate::services::{Clock, CreateExpenseInput, ExpenseService};
use crate::storage::{ExpenseQuery, SortOrder, Storage};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "12.50" or "$12.50")
        amount: String,
        /// Category label
        category: String,
        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// What the money was spent on
        #[arg(short = 'n', long)]
        description: Option<String>,
        /// How it was paid (cash, card, ...)
        #[arg(short, long)]
        payment_mode: Option<String>,
    },

    /// List expenses
    #[command(alias = "ls")]
    List {
        /// Month number (1-12)
        #[arg(short, long)]
        month: Option<u32>,
        /// Year
        #[arg(short, long)]
        year: Option<i32>,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
        /// Exact date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Sort order: newest or oldest
        #[arg(short, long)]
        sort: Option<String>,
        /// Include deleted expenses
        #[arg(long)]
        all: bool,
        /// Export the listing to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show one expense
    Show {
        /// Expense ID (full or abbreviated)
        id: String,
    },

    /// Delete an expense (it is kept but no longer counted)
    #[command(alias = "rm")]
    Delete {
        /// Expense ID (full or abbreviated)
        id: String,
    },

    /// List every category in use
    Categories,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: ExpenseCommands,
) -> PocketbookResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
            payment_mode,
        } => {
            let amount = Money::parse(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => clock.today(),
            };

            let mut input = CreateExpenseInput::new(amount, category, date);
            input.description = description;
            input.payment_mode = payment_mode;
            let expense = service.create(input)?;

            println!(
                "Recorded {} for {} on {} ({})",
                expense.amount.format_with_symbol(&settings.currency_symbol),
                expense.category,
                expense.date.format(&settings.date_format),
                expense.id
            );
        }

        ExpenseCommands::List {
            month,
            year,
            category,
            date,
            sort,
            all,
            output,
        } => {
            let mut query = ExpenseQuery::new();
            if let Some(month) = month {
                query = query.month(validate_month(month)?);
            }
            if let Some(year) = year {
                query = query.year(year);
            }
            if let Some(category) = category {
                query = query.category(category);
            }
            if let Some(date) = date {
                query = query.on(parse_date(&date)?);
            }
            query.include_deleted = all;

            let order = match sort {
                Some(s) => s.parse::<SortOrder>()?,
                None => settings.default_sort,
            };
            let expenses = service.list(&query, order)?;

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    PocketbookError::Export(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                export_expenses_csv(&expenses, BufWriter::new(file))?;
                println!("Exported {} expenses to: {}", expenses.len(), path.display());
            } else {
                print!("{}", format_expense_list(&expenses, &settings.date_format));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(&id)?;
            print!("{}", format_expense_details(&expense));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.delete(&id)?;
            println!(
                "Deleted {} ({} on {})",
                expense.id, expense.category, expense.date
            );
        }

        ExpenseCommands::Categories => {
            let categories = service.categories()?;
            if categories.is_empty() {
                println!("No categories yet.");
            }
            for category in categories {
                println!("{}", category);
            }
        }
    }

    Ok(())
}
