//! Spending aggregation
//!
//! Rollups over a snapshot of expense records: totals by month, year and
//! category, the zero-filled monthly breakdown, extrema, averages and budget
//! alerts. Only active, non-shared records count towards any total.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::PocketbookResult;
use crate::models::{month_name, validate_month, Budget, Expense, Money, YearMonth, MONTH_NAMES};

/// Total spending for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    pub month: u32,
    pub name: &'static str,
    pub total: Money,
}

/// Month-by-month spending for a year, in calendar order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthlyBreakdown {
    months: Vec<MonthTotal>,
}

impl MonthlyBreakdown {
    pub fn months(&self) -> &[MonthTotal] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Total for a month by name
    pub fn get(&self, name: &str) -> Option<Money> {
        self.months.iter().find(|m| m.name == name).map(|m| m.total)
    }

    /// Sum of every month in the breakdown
    pub fn total(&self) -> Money {
        self.months.iter().map(|m| m.total).sum()
    }

    pub fn chart_series(&self) -> ChartSeries {
        chart_series(self.months.iter().map(|m| (m.name, m.total)))
    }
}

/// A category whose spend went over its monthly limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetAlert {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
}

impl BudgetAlert {
    /// How far spending went past the limit
    pub fn overage(&self) -> Money {
        self.spent - self.limit
    }
}

/// Parallel label and value sequences for charting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Money>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate (label, value) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Split (label, value) pairs into chart series, keeping their order
pub fn chart_series<I, K>(pairs: I) -> ChartSeries
where
    I: IntoIterator<Item = (K, Money)>,
    K: Into<String>,
{
    let (labels, values) = pairs
        .into_iter()
        .map(|(label, value)| (label.into(), value))
        .unzip();
    ChartSeries { labels, values }
}

/// Spending rollups over an immutable snapshot of expenses
///
/// `current` is the period observed when the snapshot was taken; it decides
/// how many months of the current year the breakdown and average cover.
pub struct AggregationEngine<'a> {
    expenses: &'a [Expense],
    current: YearMonth,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(expenses: &'a [Expense], current: YearMonth) -> Self {
        Self { expenses, current }
    }

    pub fn current(&self) -> YearMonth {
        self.current
    }

    fn countable(&self) -> impl Iterator<Item = &'a Expense> + 'a {
        self.expenses.iter().filter(|e| e.is_countable())
    }

    /// Number of months of `year` covered by the breakdown and average
    pub fn months_to_show(&self, year: i32) -> u32 {
        if year == self.current.year {
            self.current.month
        } else {
            12
        }
    }

    /// Total spending in one month
    pub fn monthly_total(&self, month: u32, year: i32) -> PocketbookResult<Money> {
        validate_month(month)?;
        Ok(self
            .countable()
            .filter(|e| e.month == month && e.year == year)
            .map(|e| e.amount)
            .sum())
    }

    /// Total spending in one year
    pub fn yearly_total(&self, year: i32) -> Money {
        self.countable()
            .filter(|e| e.year == year)
            .map(|e| e.amount)
            .sum()
    }

    /// Spending per category, optionally narrowed to a month and/or year
    pub fn category_totals(
        &self,
        month: Option<u32>,
        year: Option<i32>,
    ) -> PocketbookResult<BTreeMap<String, Money>> {
        if let Some(month) = month {
            validate_month(month)?;
        }

        let mut totals: BTreeMap<String, Money> = BTreeMap::new();
        for expense in self.countable() {
            if month.is_some_and(|m| expense.month != m) || year.is_some_and(|y| expense.year != y)
            {
                continue;
            }
            *totals.entry(expense.category.clone()).or_default() += expense.amount;
        }

        tracing::debug!(?month, ?year, categories = totals.len(), "category totals");
        Ok(totals)
    }

    /// Spending for each month of `year` that has started, zero-filled
    pub fn monthly_breakdown(&self, year: i32) -> MonthlyBreakdown {
        let shown = self.months_to_show(year);
        let mut sums = vec![Money::zero(); shown as usize];

        for expense in self.countable().filter(|e| e.year == year) {
            match expense.month {
                m @ 1..=12 if m <= shown => sums[(m - 1) as usize] += expense.amount,
                1..=12 => {}
                m => tracing::warn!(id = %expense.id, month = m, "expense month out of range"),
            }
        }

        let months = sums
            .into_iter()
            .zip(MONTH_NAMES)
            .zip(1u32..)
            .map(|((total, name), month)| MonthTotal { month, name, total })
            .collect();

        MonthlyBreakdown { months }
    }

    /// The month with the most spending; ties go to the earlier month
    pub fn highest_spending_month(&self, year: i32) -> (Option<&'static str>, Money) {
        let breakdown = self.monthly_breakdown(year);
        first_maximum(breakdown.months().iter().map(|m| (m.name, m.total)))
    }

    /// The category with the most spending in `year`; ties go to the
    /// alphabetically first category
    pub fn highest_spending_category(&self, year: i32) -> PocketbookResult<(Option<String>, Money)> {
        let totals = self.category_totals(None, Some(year))?;
        Ok(first_maximum(totals))
    }

    /// Yearly total spread over the months shown, rounded to the cent
    pub fn average_monthly_spend(&self, year: i32) -> Money {
        let shown = i64::from(self.months_to_show(year));
        self.yearly_total(year)
            .div_round(shown)
            .unwrap_or_else(Money::zero)
    }

    /// Every year with at least one record, deleted and shared included
    pub fn available_years(&self) -> Vec<i32> {
        self.expenses
            .iter()
            .map(|e| e.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Budgets whose category spend in the month is strictly over the limit,
    /// in budget order
    pub fn budget_alerts(
        &self,
        budgets: &[Budget],
        month: u32,
        year: i32,
    ) -> PocketbookResult<Vec<BudgetAlert>> {
        let spending = self.category_totals(Some(month), Some(year))?;

        let alerts: Vec<_> = budgets
            .iter()
            .filter_map(|budget| {
                let spent = spending
                    .get(&budget.category)
                    .copied()
                    .unwrap_or_default();
                budget.is_exceeded_by(spent).then(|| BudgetAlert {
                    category: budget.category.clone(),
                    limit: budget.monthly_limit,
                    spent,
                })
            })
            .collect();

        let period = YearMonth { year, month };
        tracing::debug!(
            period = %period,
            budgets = budgets.len(),
            alerts = alerts.len(),
            "budget alerts"
        );
        Ok(alerts)
    }

    /// Display name of the current month
    pub fn current_month_name(&self) -> &'static str {
        month_name(self.current.month).unwrap_or(MONTH_NAMES[0])
    }
}

fn first_maximum<K>(pairs: impl IntoIterator<Item = (K, Money)>) -> (Option<K>, Money) {
    let mut best: Option<(K, Money)> = None;
    for (key, value) in pairs {
        if best.as_ref().map_or(true, |(_, top)| value > *top) {
            best = Some((key, value));
        }
    }
    match best {
        Some((key, value)) => (Some(key), value),
        None => (None, Money::zero()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(cents: i64, category: &str, y: i32, m: u32, d: u32) -> Expense {
        Expense::new(
            Money::from_cents(cents),
            category,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    fn now() -> YearMonth {
        YearMonth { year: 2025, month: 4 }
    }

    fn sample() -> Vec<Expense> {
        let mut deleted = expense(99900, "Food", 2025, 3, 9);
        deleted.mark_deleted();
        let mut shared = expense(50000, "Travel", 2025, 3, 10);
        shared.is_shared = true;

        vec![
            expense(1200, "Food", 2025, 1, 3),
            expense(4550, "Rent", 2025, 1, 1),
            expense(800, "Food", 2025, 3, 14),
            expense(2500, "Fun", 2025, 3, 20),
            expense(10000, "Food", 2024, 12, 31),
            deleted,
            shared,
        ]
    }

    #[test]
    fn test_monthly_total() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());

        assert_eq!(engine.monthly_total(1, 2025).unwrap().cents(), 5750);
        // Deleted and shared records are ignored
        assert_eq!(engine.monthly_total(3, 2025).unwrap().cents(), 3300);
        assert_eq!(engine.monthly_total(2, 2025).unwrap(), Money::zero());
    }

    #[test]
    fn test_monthly_total_ignores_insertion_order() {
        let mut expenses = sample();
        let forward = AggregationEngine::new(&expenses, now())
            .monthly_total(1, 2025)
            .unwrap();
        expenses.reverse();
        let backward = AggregationEngine::new(&expenses, now())
            .monthly_total(1, 2025)
            .unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());

        assert!(engine.monthly_total(0, 2025).unwrap_err().is_invalid_argument());
        assert!(engine.monthly_total(13, 2025).unwrap_err().is_invalid_argument());
        assert!(engine.category_totals(Some(13), None).is_err());
        assert!(engine.budget_alerts(&[], 0, 2025).is_err());
    }

    #[test]
    fn test_yearly_total() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());
        assert_eq!(engine.yearly_total(2025).cents(), 9050);
        assert_eq!(engine.yearly_total(2024).cents(), 10000);
        assert_eq!(engine.yearly_total(1999), Money::zero());
    }

    #[test]
    fn test_totals_of_largest_amounts_do_not_overflow() {
        let big = Money::parse("100000000000").unwrap();
        let expenses: Vec<Expense> = (1..=12)
            .flat_map(|m| {
                let date = NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
                [Expense::new(big, "Food", date), Expense::new(big, "Rent", date)]
            })
            .collect();
        assert!(expenses.iter().all(|e| e.validate().is_ok()));
        assert!(Money::parse("50000000000000000").is_err());

        let engine = AggregationEngine::new(&expenses, now());
        assert_eq!(engine.monthly_total(1, 2024).unwrap(), big.times(2));
        assert_eq!(engine.yearly_total(2024), big.times(24));
        assert_eq!(engine.monthly_breakdown(2024).total(), big.times(24));
        assert_eq!(engine.category_totals(None, Some(2024)).unwrap()["Food"], big.times(12));
        assert_eq!(engine.average_monthly_spend(2024), big.times(2));
    }

    #[test]
    fn test_category_totals_filters() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());

        let all = engine.category_totals(None, None).unwrap();
        assert_eq!(all["Food"].cents(), 12000);
        assert!(!all.contains_key("Travel"));

        let year = engine.category_totals(None, Some(2025)).unwrap();
        assert_eq!(year["Food"].cents(), 2000);

        let march = engine.category_totals(Some(3), Some(2025)).unwrap();
        assert_eq!(march.len(), 2);
        assert_eq!(march["Fun"].cents(), 2500);

        // Month filter alone spans every year
        let december = engine.category_totals(Some(12), None).unwrap();
        assert_eq!(december["Food"].cents(), 10000);
    }

    #[test]
    fn test_breakdown_current_year_stops_at_current_month() {
        let mut expenses = sample();
        expenses.push(expense(7000, "Food", 2025, 9, 1));
        let engine = AggregationEngine::new(&expenses, now());

        let breakdown = engine.monthly_breakdown(2025);
        let names: Vec<_> = breakdown.months().iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["January", "February", "March", "April"]);
        assert_eq!(breakdown.get("February"), Some(Money::zero()));
        assert_eq!(breakdown.get("September"), None);
        // Months after the current one are left out of the sum
        assert_eq!(breakdown.total().cents(), 9050);
        assert_eq!(engine.yearly_total(2025).cents(), 16050);
    }

    #[test]
    fn test_breakdown_full_year_sums_to_yearly_total() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());

        let breakdown = engine.monthly_breakdown(2024);
        assert_eq!(breakdown.len(), 12);
        assert_eq!(breakdown.total(), engine.yearly_total(2024));
        assert_eq!(breakdown.get("December").unwrap().cents(), 10000);
    }

    #[test]
    fn test_breakdown_without_records_is_zero_filled() {
        let engine = AggregationEngine::new(&[], now());
        let breakdown = engine.monthly_breakdown(2020);
        assert_eq!(breakdown.len(), 12);
        assert!(breakdown.months().iter().all(|m| m.total.is_zero()));
    }

    #[test]
    fn test_breakdown_skips_out_of_range_month() {
        let mut odd = expense(500, "Food", 2023, 5, 1);
        odd.month = 14;
        let expenses = vec![odd, expense(300, "Food", 2023, 5, 2)];
        let engine = AggregationEngine::new(&expenses, now());
        assert_eq!(engine.monthly_breakdown(2023).total().cents(), 300);
    }

    #[test]
    fn test_highest_spending_month() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());
        assert_eq!(
            engine.highest_spending_month(2025),
            (Some("January"), Money::from_cents(5750))
        );
    }

    #[test]
    fn test_highest_spending_month_tie_goes_to_first() {
        let expenses = vec![
            expense(1000, "A", 2024, 6, 1),
            expense(1000, "B", 2024, 2, 1),
        ];
        let engine = AggregationEngine::new(&expenses, now());
        assert_eq!(
            engine.highest_spending_month(2024),
            (Some("February"), Money::from_cents(1000))
        );

        // No spending at all still names the first month shown
        let (name, amount) = engine.highest_spending_month(2010);
        assert_eq!(name, Some("January"));
        assert!(amount.is_zero());
    }

    #[test]
    fn test_highest_spending_category() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());
        assert_eq!(
            engine.highest_spending_category(2025).unwrap(),
            (Some("Rent".to_string()), Money::from_cents(4550))
        );
        assert_eq!(
            engine.highest_spending_category(1990).unwrap(),
            (None, Money::zero())
        );
    }

    #[test]
    fn test_highest_spending_category_tie_goes_to_first_key() {
        let expenses = vec![
            expense(700, "Zoo", 2024, 1, 1),
            expense(700, "Books", 2024, 1, 2),
        ];
        let engine = AggregationEngine::new(&expenses, now());
        let (name, _) = engine.highest_spending_category(2024).unwrap();
        assert_eq!(name.as_deref(), Some("Books"));
    }

    #[test]
    fn test_average_monthly_spend() {
        let expenses = vec![
            expense(1000, "Food", 2025, 1, 1),
            expense(1000, "Food", 2025, 2, 1),
            expense(1001, "Food", 2025, 3, 1),
        ];
        let engine = AggregationEngine::new(&expenses, now());
        // 30.01 over four months
        assert_eq!(engine.average_monthly_spend(2025).cents(), 750);

        let past = vec![expense(1000, "Food", 2024, 1, 1)];
        let engine = AggregationEngine::new(&past, now());
        // 10.00 / 12 = 0.8333..
        assert_eq!(engine.average_monthly_spend(2024).cents(), 83);
        assert_eq!(engine.average_monthly_spend(2000), Money::zero());
    }

    #[test]
    fn test_average_rounds_half_away_from_zero() {
        let expenses = vec![expense(6, "Food", 2025, 1, 1)];
        let engine = AggregationEngine::new(&expenses, now());
        // 0.06 / 4 = 0.015
        assert_eq!(engine.average_monthly_spend(2025).cents(), 2);
    }

    #[test]
    fn test_available_years_include_every_record() {
        let mut old_deleted = expense(100, "Food", 2019, 2, 2);
        old_deleted.mark_deleted();
        let mut expenses = sample();
        expenses.push(old_deleted);
        let engine = AggregationEngine::new(&expenses, now());
        assert_eq!(engine.available_years(), vec![2019, 2024, 2025]);

        assert!(AggregationEngine::new(&[], now()).available_years().is_empty());
    }

    #[test]
    fn test_budget_alerts_strictly_greater() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());
        let budgets = vec![
            Budget::new("Fun", Money::from_cents(2000)),
            Budget::new("Food", Money::from_cents(800)),
            Budget::new("Books", Money::zero()),
        ];

        let alerts = engine.budget_alerts(&budgets, 3, 2025).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, "Fun");
        assert_eq!(alerts[0].spent.cents(), 2500);
        assert_eq!(alerts[0].overage().cents(), 500);
    }

    #[test]
    fn test_budget_alerts_keep_budget_order() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());
        let budgets = vec![
            Budget::new("Rent", Money::from_cents(100)),
            Budget::new("Food", Money::from_cents(100)),
        ];

        let alerts = engine.budget_alerts(&budgets, 1, 2025).unwrap();
        let categories: Vec<_> = alerts.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(categories, vec!["Rent", "Food"]);
    }

    #[test]
    fn test_chart_series_preserves_order() {
        let series = chart_series([
            ("Rent", Money::from_cents(3)),
            ("Food", Money::from_cents(1)),
            ("Fun", Money::from_cents(2)),
        ]);
        assert_eq!(series.labels, vec!["Rent", "Food", "Fun"]);
        assert_eq!(series.values[0].cents(), 3);

        let empty = chart_series(Vec::<(String, Money)>::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_breakdown_chart_series() {
        let expenses = sample();
        let engine = AggregationEngine::new(&expenses, now());
        let series = engine.monthly_breakdown(2025).chart_series();
        assert_eq!(series.len(), 4);
        assert_eq!(series.iter().next(), Some(("January", Money::from_cents(5750))));
    }
}
