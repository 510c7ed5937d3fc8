//! Budget guard
//!
//! Flags categories that are close to or over budget and proposes new
//! budgets that free up a savings target. All percentage math is done on
//! integer cents so results never depend on float rounding.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::models::{BudgetAlert, BudgetAlertKind, CategoryId, CategorySpending, Money};

/// Percent of budget used that raises a warning
pub const BUDGET_WARNING_PERCENT: i64 = 80;

/// Percent of budget used that counts as exceeded
pub const EXCEEDED_PERCENT: i64 = 100;

/// Categories using less than this percent of their budget can be trimmed
pub const UNDERUSED_PERCENT: i64 = 50;

/// Headroom added on top of actual spend for overspent categories
pub const OVERSPEND_HEADROOM_PERCENT: i64 = 10;

/// Share of an underused category's unused budget that may be released
pub const UNDERUSED_RELEASE_PERCENT: i64 = 50;

/// Analyzes category spending against budgets
#[derive(Debug, Clone)]
pub struct BudgetGuard {
    warning_percent: i64,
    underused_percent: i64,
    headroom_percent: i64,
    release_percent: i64,
    currency_symbol: String,
}

impl Default for BudgetGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// `spent >= budget * percent / 100`, without rounding
fn reaches_percent(spent: Money, budget: Money, percent: i64) -> bool {
    spent.cents() as i128 * 100 >= budget.cents() as i128 * percent as i128
}

/// `amount * percent / 100` rounded up
fn ceil_percent(amount: Money, percent: i64) -> Money {
    let scaled = amount.cents() as i128 * percent as i128;
    Money::from_cents(scaled.div_euclid(100) as i64 + i64::from(scaled.rem_euclid(100) != 0))
}

/// `amount * percent / 100` rounded down
fn floor_percent(amount: Money, percent: i64) -> Money {
    let scaled = amount.cents() as i128 * percent as i128;
    Money::from_cents(scaled.div_euclid(100) as i64)
}

/// Compare `a.spent / a.budget` with `b.spent / b.budget` for positive budgets
fn cmp_utilization(a: &CategorySpending, a_budget: Money, b: &CategorySpending, b_budget: Money) -> Ordering {
    let lhs = a.spent.cents() as i128 * b_budget.cents() as i128;
    let rhs = b.spent.cents() as i128 * a_budget.cents() as i128;
    lhs.cmp(&rhs)
}

impl BudgetGuard {
    pub fn new() -> Self {
        Self {
            warning_percent: BUDGET_WARNING_PERCENT,
            underused_percent: UNDERUSED_PERCENT,
            headroom_percent: OVERSPEND_HEADROOM_PERCENT,
            release_percent: UNDERUSED_RELEASE_PERCENT,
            currency_symbol: "$".to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let policy = &settings.policy;
        Self {
            warning_percent: policy.budget_warning_percent,
            underused_percent: policy.underused_percent,
            headroom_percent: policy.overspend_headroom_percent,
            release_percent: policy.underused_release_percent,
            currency_symbol: settings.currency_symbol.clone(),
        }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Alerts for categories at or above the warning threshold
    ///
    /// Exceeded categories come first, then warnings; within each group the
    /// most used budget comes first. Categories without a positive budget
    /// are ignored.
    pub fn analyze_budget(&self, categories: &[CategorySpending]) -> Vec<BudgetAlert> {
        let mut alerts = Vec::new();

        for category in categories {
            let Some(budget) = category.effective_budget() else {
                continue;
            };
            let spent = category.spent;
            let percent_used = spent.whole_percent_of(budget);

            let (kind, message) = if reaches_percent(spent, budget, EXCEEDED_PERCENT) {
                warn!(
                    category = %category.category_id,
                    budget = budget.cents(),
                    spent = spent.cents(),
                    "category over budget"
                );
                (
                    BudgetAlertKind::Exceeded,
                    format!(
                        "{} budget exceeded by {}.",
                        category.category_name,
                        self.money(spent - budget)
                    ),
                )
            } else if reaches_percent(spent, budget, self.warning_percent) {
                (
                    BudgetAlertKind::Warning,
                    format!(
                        "{} is at {}% of its budget. {} left.",
                        category.category_name,
                        percent_used,
                        self.money(budget - spent)
                    ),
                )
            } else {
                continue;
            };

            alerts.push(BudgetAlert {
                kind,
                category_id: category.category_id.clone(),
                category_name: category.category_name.clone(),
                budget,
                spent,
                percent_used,
                message,
            });
        }

        alerts.sort_by_key(|a| (a.kind != BudgetAlertKind::Exceeded, Reverse(a.percent_used)));
        debug!(categories = categories.len(), alerts = alerts.len(), "analyzed budget");
        alerts
    }

    /// Suggested budgets per category
    ///
    /// Every overspent category gets its spend plus headroom, rounded up.
    /// Then underused categories, least used first, give up part of their
    /// unused budget until `target_savings` is covered.
    pub fn suggest_adjustment(
        &self,
        categories: &[CategorySpending],
        target_savings: Money,
    ) -> BTreeMap<CategoryId, Money> {
        let mut suggestions = BTreeMap::new();

        for category in categories.iter().filter(|c| c.is_overspent()) {
            let suggested = ceil_percent(category.spent, 100 + self.headroom_percent);
            suggestions.insert(category.category_id.clone(), suggested);
        }

        let mut underused: Vec<(&CategorySpending, Money)> = categories
            .iter()
            .filter_map(|c| c.effective_budget().map(|b| (c, b)))
            .filter(|(c, b)| !reaches_percent(c.spent, *b, self.underused_percent))
            .collect();
        underused.sort_by(|(a, a_budget), (b, b_budget)| cmp_utilization(a, *a_budget, b, *b_budget));

        let mut remaining = target_savings;
        for (category, budget) in underused {
            if !remaining.is_positive() {
                break;
            }
            let unused = budget - category.spent;
            let reduction = floor_percent(unused, self.release_percent).min(remaining);

            suggestions.insert(category.category_id.clone(), budget - reduction);
            remaining -= reduction;
        }

        debug!(
            suggestions = suggestions.len(),
            target = target_savings.cents(),
            uncovered = remaining.non_negative().cents(),
            "suggested budget adjustment"
        );
        suggestions
    }

    /// Budget still available across all budgeted categories
    pub fn remaining_budget(&self, categories: &[CategorySpending]) -> Money {
        categories.iter().map(|c| c.available()).sum()
    }
}
