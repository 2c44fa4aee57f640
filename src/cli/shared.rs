//! Shared expense CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_balances, format_shared_details, format_shared_list};
use crate::error::{PocketbookError, PocketbookResult};
use crate::export::export_shared_csv;
use crate::models::{parse_date, Money};
use crate::services::{Clock, CreateSharedInput, SharedExpenseService};
use crate::storage::{SettlementFilter, SharedQuery, SortOrder, Storage};

/// Shared expense subcommands
#[derive(Subcommand, Debug)]
pub enum SharedCommands {
    /// Record an expense paid by one person for a group
    Add {
        /// What it was for
        title: String,
        /// Total amount paid
        amount: String,
        /// Who paid
        #[arg(short, long)]
        paid_by: String,
        /// Everyone else sharing the cost, comma-separated ("bob, carol")
        #[arg(short = 'w', long = "with", default_value = "")]
        participants: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List shared expenses
    #[command(alias = "ls")]
    List {
        /// Only pending or settled records
        #[arg(long)]
        status: Option<String>,
        /// Only records involving this person
        #[arg(short, long)]
        participant: Option<String>,
        /// Sort order: newest or oldest
        #[arg(short, long)]
        sort: Option<String>,
        /// Export the listing to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show one shared expense
    Show {
        /// Shared expense ID (full or abbreviated)
        id: String,
    },

    /// Mark a shared expense as settled
    Settle {
        /// Shared expense ID (full or abbreviated)
        id: String,
        /// Settlement date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show who owes whom across unsettled expenses
    Balances {
        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },

    /// List everyone who appears on a shared expense
    People,
}

/// Handle a shared expense command
pub fn handle_shared_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: SharedCommands,
) -> PocketbookResult<()> {
    let service = SharedExpenseService::new(storage);

    match cmd {
        SharedCommands::Add {
            title,
            amount,
            paid_by,
            participants,
            date,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => clock.today(),
            };
            let shared = service.create(CreateSharedInput {
                title,
                total_amount: Money::parse(&amount)?,
                paid_by,
                participants,
                date,
            })?;

            println!(
                "Recorded {} paid by {}: {} shares of {} ({})",
                shared.total_amount.format_with_symbol(&settings.currency_symbol),
                shared.paid_by,
                shared.share_count(),
                shared
                    .per_person_amount
                    .format_with_symbol(&settings.currency_symbol),
                shared.id
            );
        }

        SharedCommands::List {
            status,
            participant,
            sort,
            output,
        } => {
            let mut query = SharedQuery::new();
            if let Some(status) = status {
                query = query.status(status.parse::<SettlementFilter>()?);
            }
            if let Some(participant) = participant {
                query = query.participant(participant);
            }
            let order = match sort {
                Some(s) => s.parse::<SortOrder>()?,
                None => settings.default_sort,
            };
            let records = service.list(&query, order)?;

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    PocketbookError::Export(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                export_shared_csv(&records, BufWriter::new(file))?;
                println!(
                    "Exported {} shared expenses to: {}",
                    records.len(),
                    path.display()
                );
            } else {
                print!("{}", format_shared_list(&records, &settings.date_format));
            }
        }

        SharedCommands::Show { id } => {
            let shared = service.find(&id)?;
            print!("{}", format_shared_details(&shared));
        }

        SharedCommands::Settle { id, date } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => clock.today(),
            };
            let shared = service.settle(&id, date)?;
            println!("Settled '{}' on {}", shared.title, date);
        }

        SharedCommands::Balances { plain } => {
            let summary = service.balances()?;
            print!("{}", format_balances(&summary, !plain));
        }

        SharedCommands::People => {
            for person in service.participants()? {
                println!("{}", person);
            }
        }
    }

    Ok(())
}
