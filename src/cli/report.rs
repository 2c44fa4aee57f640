//! CLI commands for reports
//!
//! The yearly dashboard, category totals and the monthly breakdown, printed
//! to the terminal or exported to a file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::display::{format_breakdown, format_chart};
use crate::error::{PocketbookError, PocketbookResult};
use crate::export::{export_chart_csv, export_dashboard_json};
use crate::models::validate_month;
use crate::reports::{chart_series, AggregationEngine, DashboardReport};
use crate::services::{Clock, PeriodService};
use crate::storage::{RecordSource, Storage};

/// File format for exported reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending dashboard for a year
    #[command(alias = "dash")]
    Dashboard {
        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Export to a file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ReportFormat,
    },

    /// Spending by category
    Categories {
        /// Year (all years when omitted)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month number (1-12)
        #[arg(short, long)]
        month: Option<u32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month-by-month spending for a year
    Breakdown {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    clock: &dyn Clock,
    cmd: ReportCommands,
) -> PocketbookResult<()> {
    match cmd {
        ReportCommands::Dashboard {
            year,
            output,
            format,
        } => {
            let report = DashboardReport::generate(storage, year, clock)?;
            match output {
                Some(path) => {
                    let mut writer = create_file(&path)?;
                    match format {
                        ReportFormat::Csv => report.export_csv(&mut writer)?,
                        ReportFormat::Json => export_dashboard_json(&report, &mut writer)?,
                    }
                    writer.flush()?;
                    println!("Dashboard exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Categories {
            year,
            month,
            output,
        } => {
            let month = month.map(validate_month).transpose()?;
            let expenses = storage.all_expenses()?;
            let current = PeriodService::new(clock).current_period();
            let totals = AggregationEngine::new(&expenses, current).category_totals(month, year)?;
            let series = chart_series(totals);

            match output {
                Some(path) => {
                    export_chart_csv(&series, "Category", create_file(&path)?)?;
                    println!("Category totals exported to: {}", path.display());
                }
                None => {
                    println!("Spending by Category");
                    print!("{}", format_chart(&series, 20));
                }
            }
        }

        ReportCommands::Breakdown { year, output } => {
            let current = PeriodService::new(clock).current_period();
            let year = year.unwrap_or(current.year);
            let expenses = storage.all_expenses()?;
            let breakdown = AggregationEngine::new(&expenses, current).monthly_breakdown(year);

            match output {
                Some(path) => {
                    export_chart_csv(&breakdown.chart_series(), "Month", create_file(&path)?)?;
                    println!("Monthly breakdown exported to: {}", path.display());
                }
                None => print!("{}", format_breakdown(year, &breakdown)),
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
