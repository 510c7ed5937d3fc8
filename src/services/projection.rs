//! Cash-flow projection
//!
//! Simulates future months from a flat income assumption, the expenses
//! already scheduled for each month and the active goals' monthly
//! allocations.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::estimator::GoalEstimator;
use crate::models::goal::percent_complete;
use crate::models::{
    Clock, Competence, Goal, GoalAllocation, GoalId, MonthProjection, MonthlyIncome, Money,
    PendingExpense, ProjectionInput,
};

/// Projection horizon when none is requested
pub const DEFAULT_MONTHS_AHEAD: u32 = 12;

/// Longest horizon the front ends accept
pub const MAX_MONTHS_AHEAD: u32 = 24;

/// Mean of the monthly income totals, rounded half away from zero
///
/// Falls back to `fallback` when there is no history.
pub fn average_monthly_income(history: &[MonthlyIncome], fallback: Money) -> Money {
    if history.is_empty() {
        return fallback;
    }

    let total: i128 = history.iter().map(|m| m.amount.cents() as i128).sum();
    let count = history.len() as i128;
    let mean = if total >= 0 {
        (2 * total + count) / (2 * count)
    } else {
        -((-2 * total + count) / (2 * count))
    };
    Money::from_cents(mean as i64)
}

/// Builds month-by-month projections starting at the current month
#[derive(Debug, Clone, Copy)]
pub struct ProjectionCalculator {
    start: Competence,
    estimator: GoalEstimator,
}

impl ProjectionCalculator {
    pub fn new(clock: &Clock) -> Self {
        Self {
            start: clock.current_competence(),
            estimator: GoalEstimator::new(clock),
        }
    }

    /// First projected month
    pub fn start(&self) -> Competence {
        self.start
    }

    /// Project `months_ahead` months
    ///
    /// The cumulative balance starts at `starting_balance` and gains each
    /// month's net flow. Goal progress compounds across months but only
    /// inside this call; the given goals are never modified.
    pub fn calculate(
        &self,
        months_ahead: u32,
        starting_balance: Money,
        average_income: Money,
        pending_expenses: &[PendingExpense],
        goals: &[Goal],
    ) -> Vec<MonthProjection> {
        let mut active: Vec<&Goal> = goals.iter().filter(|g| g.is_active()).collect();
        active.sort_by_key(|g| g.priority);

        let mut progress: HashMap<&GoalId, Money> =
            active.iter().map(|&g| (&g.id, g.current)).collect();
        let mut cumulative_balance = starting_balance;
        let mut projections = Vec::with_capacity(months_ahead as usize);

        for competence in self.start.range(months_ahead as usize) {
            let month_expenses: Vec<&PendingExpense> = pending_expenses
                .iter()
                .filter(|e| e.competence() == competence)
                .collect();

            let income_total = average_income;
            let expense_total: Money = month_expenses.iter().map(|e| e.amount).sum();
            let balance = income_total - expense_total;
            cumulative_balance += balance;

            let goal_allocations =
                self.allocate(&active, &mut progress, cumulative_balance.non_negative());

            trace!(
                month = %competence,
                income = income_total.cents(),
                expenses = expense_total.cents(),
                cumulative = cumulative_balance.cents(),
                "projected month"
            );

            projections.push(MonthProjection {
                competence,
                month: competence.first_day(),
                income_total,
                expense_total,
                balance,
                cumulative_balance,
                pending_installments: month_expenses.len(),
                goal_allocations,
            });
        }

        debug!(
            start = %self.start,
            months = projections.len(),
            goals = active.len(),
            "calculated projection"
        );
        projections
    }

    /// Project from a caller-supplied input bundle
    ///
    /// Missing horizon falls back to `default_months`; missing income is
    /// derived from the income history.
    pub fn calculate_input(&self, input: &ProjectionInput, default_months: u32) -> Vec<MonthProjection> {
        let income = input
            .average_income
            .unwrap_or_else(|| average_monthly_income(&input.income_history, Money::zero()));

        self.calculate(
            input.months_ahead.unwrap_or(default_months),
            input.starting_balance,
            income,
            &input.pending_expenses,
            &input.goals,
        )
    }

    fn allocate<'a>(
        &self,
        goals: &[&'a Goal],
        progress: &mut HashMap<&'a GoalId, Money>,
        available: Money,
    ) -> Vec<GoalAllocation> {
        let mut remaining = available;

        goals
            .iter()
            .map(|&goal| {
                let monthly = goal.allocation_or_zero();
                let allocated = monthly.min(remaining).non_negative();
                remaining -= allocated;

                let entry = progress.entry(&goal.id).or_insert(goal.current);
                *entry += allocated;
                let current = *entry;

                GoalAllocation {
                    goal_id: goal.id.clone(),
                    goal_name: goal.name.clone(),
                    allocated,
                    target: goal.target,
                    current,
                    percent_complete: percent_complete(current, goal.target),
                    estimated_date: self.estimator.estimate_completion(goal.target, current, monthly),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::models::GoalStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn calculator() -> ProjectionCalculator {
        ProjectionCalculator::new(&Clock::fixed(date(2025, 10, 19)))
    }

    fn income(month: &str, amount: i64) -> MonthlyIncome {
        MonthlyIncome {
            competence: month.parse().unwrap(),
            amount: cents(amount),
        }
    }

    #[test]
    fn test_months_start_at_current_competence() {
        let result = calculator().calculate(3, cents(0), cents(1000), &[], &[]);

        let months: Vec<String> = result.iter().map(|m| m.competence.to_string()).collect();
        assert_eq!(months, vec!["2025-10", "2025-11", "2025-12"]);
        assert_eq!(result[0].month, date(2025, 10, 1));
    }

    #[test]
    fn test_zero_months_is_empty() {
        assert!(calculator().calculate(0, cents(500), cents(1000), &[], &[]).is_empty());
    }

    #[test]
    fn test_expenses_grouped_by_competence() {
        let expenses = vec![
            PendingExpense::new(cents(300), date(2025, 11, 1)),
            PendingExpense::new(cents(200), date(2025, 11, 1)),
            PendingExpense::new(cents(999), date(2027, 1, 1)),
        ];
        let result = calculator().calculate(3, cents(0), cents(1000), &expenses, &[]);

        assert_eq!(result[0].expense_total, cents(0));
        assert_eq!(result[0].pending_installments, 0);
        assert_eq!(result[1].expense_total, cents(500));
        assert_eq!(result[1].pending_installments, 2);
        assert_eq!(result[1].balance, cents(500));
    }

    #[test]
    fn test_cumulative_balance_recurrence() {
        let expenses = vec![
            PendingExpense::new(cents(1500), date(2025, 10, 1)),
            PendingExpense::new(cents(400), date(2025, 12, 1)),
        ];
        let result = calculator().calculate(4, cents(200), cents(1000), &expenses, &[]);

        let cumulative: Vec<i64> = result.iter().map(|m| m.cumulative_balance.cents()).collect();
        assert_eq!(cumulative, vec![-300, 700, 1300, 2300]);
        assert!(result[0].is_shortfall());

        let mut running = cents(200);
        for month in &result {
            running += month.balance;
            assert_eq!(month.cumulative_balance, running);
        }
    }

    #[test]
    fn test_priority_served_first() {
        let goals = vec![
            Goal::new("low", "Low", cents(100000))
                .with_priority(2)
                .with_monthly_allocation(cents(800)),
            Goal::new("high", "High", cents(100000))
                .with_priority(1)
                .with_monthly_allocation(cents(800)),
        ];
        let result = calculator().calculate(1, cents(0), cents(1000), &[], &goals);

        let allocations = &result[0].goal_allocations;
        assert_eq!(allocations[0].goal_id.as_str(), "high");
        assert_eq!(allocations[0].allocated, cents(800));
        assert_eq!(allocations[1].allocated, cents(200));
        assert_eq!(result[0].total_allocated(), cents(1000));
    }

    #[test]
    fn test_progress_compounds_across_months() {
        let goals = vec![Goal::new("trip", "Trip", cents(3000))
            .with_current(cents(500))
            .with_monthly_allocation(cents(1000))];
        let result = calculator().calculate(3, cents(0), cents(2000), &[], &goals);

        let current: Vec<i64> = result
            .iter()
            .map(|m| m.goal_allocations[0].current.cents())
            .collect();
        assert_eq!(current, vec![1500, 2500, 3500]);
        assert_eq!(result[0].goal_allocations[0].percent_complete, 50);
        assert_eq!(result[2].goal_allocations[0].percent_complete, 100);

        // 1500 missing at 1000/month needs 2 more months
        assert_eq!(result[0].goal_allocations[0].estimated_date, Some(date(2025, 12, 1)));
        assert_eq!(result[2].goal_allocations[0].estimated_date, Some(date(2025, 10, 19)));

        // Input goals untouched
        assert_eq!(goals[0].current, cents(500));
    }

    #[test]
    fn test_negative_balance_allocates_nothing() {
        let goals = vec![Goal::new("a", "A", cents(1000)).with_monthly_allocation(cents(100))];
        let result = calculator().calculate(1, cents(-5000), cents(1000), &[], &goals);

        assert_eq!(result[0].goal_allocations[0].allocated, Money::zero());
    }

    #[test]
    fn test_inactive_goals_excluded() {
        let goals = vec![
            Goal::new("paused", "Paused", cents(1000))
                .with_monthly_allocation(cents(100))
                .with_status(GoalStatus::Paused),
            Goal::new("live", "Live", cents(1000)).with_monthly_allocation(cents(100)),
        ];
        let result = calculator().calculate(1, cents(0), cents(1000), &[], &goals);

        assert_eq!(result[0].goal_allocations.len(), 1);
        assert_eq!(result[0].goal_allocations[0].goal_id.as_str(), "live");
    }

    #[test]
    fn test_goal_without_allocation_has_no_estimate() {
        let goals = vec![Goal::new("a", "A", cents(1000))];
        let result = calculator().calculate(1, cents(0), cents(1000), &[], &goals);

        assert_eq!(result[0].goal_allocations[0].allocated, Money::zero());
        assert_eq!(result[0].goal_allocations[0].estimated_date, None);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let expenses = vec![PendingExpense::new(cents(700), date(2025, 11, 1))];
        let goals = vec![Goal::new("a", "A", cents(5000)).with_monthly_allocation(cents(400))];
        let calc = calculator();

        let first = calc.calculate(6, cents(100), cents(1000), &expenses, &goals);
        let second = calc.calculate(6, cents(100), cents(1000), &expenses, &goals);
        assert_eq!(first, second);
    }

    #[test]
    fn test_average_monthly_income() {
        let history = vec![income("2025-07", 1000), income("2025-08", 1001)];
        assert_eq!(average_monthly_income(&history, cents(0)), cents(1001));

        let negative = vec![income("2025-07", -1000), income("2025-08", -1001)];
        assert_eq!(average_monthly_income(&negative, cents(0)), cents(-1001));

        assert_eq!(average_monthly_income(&[], cents(4242)), cents(4242));
    }

    #[test]
    fn test_calculate_input_defaults() {
        let input = ProjectionInput {
            months_ahead: None,
            starting_balance: cents(0),
            average_income: None,
            income_history: vec![income("2025-08", 3000), income("2025-09", 5000)],
            pending_expenses: vec![],
            goals: vec![],
        };
        let result = calculator().calculate_input(&input, DEFAULT_MONTHS_AHEAD);

        assert_eq!(result.len(), 12);
        assert_eq!(result[0].income_total, cents(4000));
    }
}
