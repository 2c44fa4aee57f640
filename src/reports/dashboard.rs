//! Spending dashboard
//!
//! Everything shown for one selected year: totals, the monthly breakdown and
//! its chart, category chart, extrema, average and budget alerts. The month
//! figures and alerts only make sense while the selected year is running, so
//! they are left out for any other year.

use std::io::Write;

use serde::Serialize;

use crate::error::PocketbookResult;
use crate::models::{Money, YearMonth};
use crate::services::period::{Clock, PeriodService};
use crate::storage::RecordSource;

use super::aggregation::{chart_series, AggregationEngine, BudgetAlert, ChartSeries, MonthlyBreakdown};

/// Label used in place of a month name when a past or future year is viewed
pub const FULL_YEAR_LABEL: &str = "Full Year";

/// Dashboard for a single year
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    /// Year being viewed
    pub year: i32,
    /// Period the dashboard was generated in
    pub generated_in: YearMonth,
    /// Current month name, or "Full Year"
    pub month_label: String,
    /// Spending so far this month (current year only)
    pub monthly_total: Option<Money>,
    pub yearly_total: Money,
    pub monthly_breakdown: MonthlyBreakdown,
    pub monthly_chart: ChartSeries,
    pub category_chart: ChartSeries,
    pub highest_month: Option<String>,
    pub highest_month_amount: Money,
    pub top_category: Option<String>,
    pub top_category_amount: Money,
    pub average_monthly_spend: Money,
    /// Budgets overspent this month (current year only)
    pub budget_alerts: Vec<BudgetAlert>,
    pub available_years: Vec<i32>,
}

impl DashboardReport {
    /// Build the dashboard from a fresh snapshot of `source`
    ///
    /// `year` defaults to the current year.
    pub fn generate<S: RecordSource + ?Sized>(
        source: &S,
        year: Option<i32>,
        clock: &dyn Clock,
    ) -> PocketbookResult<Self> {
        let current = PeriodService::new(clock).current_period();
        let year = year.unwrap_or(current.year);

        let expenses = source.all_expenses()?;
        let engine = AggregationEngine::new(&expenses, current);

        let current_month = (year == current.year).then_some(current.month);
        let month_label = match current_month {
            Some(_) => engine.current_month_name().to_string(),
            None => FULL_YEAR_LABEL.to_string(),
        };

        let monthly_total = current_month
            .map(|month| engine.monthly_total(month, year))
            .transpose()?;

        let budget_alerts = match current_month {
            Some(month) => engine.budget_alerts(&source.query_budgets()?, month, year)?,
            None => Vec::new(),
        };

        let monthly_breakdown = engine.monthly_breakdown(year);
        let monthly_chart = monthly_breakdown.chart_series();
        let category_chart = chart_series(engine.category_totals(None, Some(year))?);
        let (highest_month, highest_month_amount) = engine.highest_spending_month(year);
        let (top_category, top_category_amount) = engine.highest_spending_category(year)?;

        tracing::debug!(
            year,
            records = expenses.len(),
            alerts = budget_alerts.len(),
            "generated dashboard"
        );

        Ok(Self {
            year,
            generated_in: current,
            month_label,
            monthly_total,
            yearly_total: engine.yearly_total(year),
            monthly_breakdown,
            monthly_chart,
            category_chart,
            highest_month: highest_month.map(str::to_string),
            highest_month_amount,
            top_category,
            top_category_amount,
            average_monthly_spend: engine.average_monthly_spend(year),
            budget_alerts,
            available_years: engine.available_years(),
        })
    }

    pub fn is_current_year(&self) -> bool {
        self.year == self.generated_in.year
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard: {} ({})\n", self.year, self.month_label));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if let Some(total) = self.monthly_total {
            output.push_str(&format!("{:<28} {:>14}\n", "This Month:", total));
        }
        output.push_str(&format!("{:<28} {:>14}\n", "This Year:", self.yearly_total));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Average / Month:", self.average_monthly_spend
        ));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            format!(
                "Highest Month ({}):",
                self.highest_month.as_deref().unwrap_or("-")
            ),
            self.highest_month_amount
        ));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            format!(
                "Top Category ({}):",
                self.top_category.as_deref().unwrap_or("-")
            ),
            self.top_category_amount
        ));

        output.push_str("\nMonthly Breakdown\n");
        output.push_str(&"-".repeat(50));
        output.push('\n');
        for month in self.monthly_breakdown.months() {
            output.push_str(&format!("  {:<26} {:>14}\n", month.name, month.total));
        }

        if !self.category_chart.is_empty() {
            output.push_str("\nBy Category\n");
            output.push_str(&"-".repeat(50));
            output.push('\n');
            for (category, total) in self.category_chart.iter() {
                output.push_str(&format!("  {:<26} {:>14}\n", category, total));
            }
        }

        if !self.budget_alerts.is_empty() {
            output.push_str("\nBudget Alerts\n");
            output.push_str(&"-".repeat(50));
            output.push('\n');
            for alert in &self.budget_alerts {
                output.push_str(&format!(
                    "  {:<20} spent {} of {} (over by {})\n",
                    alert.category,
                    alert.spent,
                    alert.limit,
                    alert.overage()
                ));
            }
        }

        if !self.available_years.is_empty() {
            let years: Vec<_> = self.available_years.iter().map(i32::to_string).collect();
            output.push_str(&format!("\nYears with records: {}\n", years.join(", ")));
        }

        output
    }

    /// Export the dashboard figures as CSV rows of (section, label, amount)
    pub fn export_csv<W: Write>(&self, writer: W) -> PocketbookResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Section", "Label", "Amount"])?;

        let year = self.year.to_string();
        if let Some(total) = self.monthly_total {
            csv.write_record([
                "Summary",
                self.month_label.as_str(),
                total.to_decimal_string().as_str(),
            ])?;
        }
        csv.write_record([
            "Summary",
            year.as_str(),
            self.yearly_total.to_decimal_string().as_str(),
        ])?;
        csv.write_record([
            "Summary",
            "Average Monthly",
            self.average_monthly_spend.to_decimal_string().as_str(),
        ])?;

        for month in self.monthly_breakdown.months() {
            csv.write_record(["Month", month.name, month.total.to_decimal_string().as_str()])?;
        }
        for (category, total) in self.category_chart.iter() {
            csv.write_record(["Category", category, total.to_decimal_string().as_str()])?;
        }
        for alert in &self.budget_alerts {
            csv.write_record([
                "Budget Alert",
                alert.category.as_str(),
                alert.spent.to_decimal_string().as_str(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketbookPaths;
    use crate::models::Expense;
    use crate::services::period::FixedClock;
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, cents: i64, category: &str, y: i32, m: u32, d: u32) {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        storage
            .expenses
            .upsert(Expense::new(Money::from_cents(cents), category, date))
            .unwrap();
    }

    fn seeded() -> (TempDir, Storage) {
        let (temp_dir, storage) = create_test_storage();
        add(&storage, 12000, "Food", 2025, 1, 5);
        add(&storage, 3000, "Fun", 2025, 3, 2);
        add(&storage, 6000, "Food", 2025, 3, 9);
        add(&storage, 50000, "Rent", 2024, 7, 1);
        storage.budgets.set_limit("Food", Money::from_cents(5000)).unwrap();
        storage.budgets.set_limit("Fun", Money::from_cents(3000)).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_current_year_dashboard() {
        let (_temp_dir, storage) = seeded();
        let clock = FixedClock::at(2025, 3).unwrap();

        let report = DashboardReport::generate(&storage, None, &clock).unwrap();

        assert_eq!(report.year, 2025);
        assert!(report.is_current_year());
        assert_eq!(report.month_label, "March");
        assert_eq!(report.monthly_total, Some(Money::from_cents(9000)));
        assert_eq!(report.yearly_total.cents(), 21000);
        assert_eq!(report.monthly_breakdown.len(), 3);
        assert_eq!(report.monthly_chart.labels, vec!["January", "February", "March"]);
        assert_eq!(report.highest_month.as_deref(), Some("January"));
        assert_eq!(report.top_category.as_deref(), Some("Food"));
        assert_eq!(report.top_category_amount.cents(), 18000);
        assert_eq!(report.average_monthly_spend.cents(), 7000);
        assert_eq!(report.available_years, vec![2024, 2025]);

        // Fun sits exactly on its limit
        assert_eq!(report.budget_alerts.len(), 1);
        assert_eq!(report.budget_alerts[0].category, "Food");
    }

    #[test]
    fn test_other_year_dashboard() {
        let (_temp_dir, storage) = seeded();
        let clock = FixedClock::at(2025, 3).unwrap();

        let report = DashboardReport::generate(&storage, Some(2024), &clock).unwrap();

        assert_eq!(report.month_label, FULL_YEAR_LABEL);
        assert!(report.monthly_total.is_none());
        assert!(report.budget_alerts.is_empty());
        assert_eq!(report.monthly_breakdown.len(), 12);
        assert_eq!(report.highest_month.as_deref(), Some("July"));
        // 500.00 / 12 = 41.666..
        assert_eq!(report.average_monthly_spend.cents(), 4167);
        assert_eq!(report.category_chart.labels, vec!["Rent"]);
    }

    #[test]
    fn test_empty_dashboard() {
        let (_temp_dir, storage) = create_test_storage();
        let clock = FixedClock::at(2025, 6).unwrap();

        let report = DashboardReport::generate(&storage, None, &clock).unwrap();
        assert!(report.yearly_total.is_zero());
        assert!(report.top_category.is_none());
        assert!(report.category_chart.is_empty());
        assert!(report.available_years.is_empty());

        let text = report.format_terminal();
        assert!(text.contains("Dashboard: 2025 (June)"));
    }

    #[test]
    fn test_format_and_export() {
        let (_temp_dir, storage) = seeded();
        let clock = FixedClock::at(2025, 3).unwrap();
        let report = DashboardReport::generate(&storage, None, &clock).unwrap();

        let text = report.format_terminal();
        assert!(text.contains("Budget Alerts"));
        assert!(text.contains("Top Category (Food):"));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.starts_with("Section,Label,Amount\n"));
        assert!(csv.contains("Summary,March,90.00\n"));
        assert!(csv.contains("Month,February,0.00\n"));
        assert!(csv.contains("Budget Alert,Food,60.00\n"));
    }

    #[test]
    fn test_serializes_to_json() {
        let (_temp_dir, storage) = seeded();
        let clock = FixedClock::at(2025, 3).unwrap();
        let report = DashboardReport::generate(&storage, None, &clock).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["year"], 2025);
        assert_eq!(json["month_label"], "March");
        assert_eq!(json["monthly_breakdown"][0]["name"], "January");
    }
}
