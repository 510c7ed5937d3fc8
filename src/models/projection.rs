//! Projection models
//!
//! Inputs and outputs of the month-by-month cash-flow projection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::competence::Competence;
use super::goal::Goal;
use super::ids::GoalId;
use super::money::Money;

/// An expense already scheduled for a future month (usually an installment)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingExpense {
    #[serde(rename = "amountCents")]
    pub amount: Money,
    pub competence_at: NaiveDate,
}

impl PendingExpense {
    pub fn new(amount: Money, competence_at: NaiveDate) -> Self {
        Self {
            amount,
            competence_at,
        }
    }

    pub fn competence(&self) -> Competence {
        Competence::from_date(self.competence_at)
    }
}

/// Confirmed income total for one past month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncome {
    pub competence: Competence,
    #[serde(rename = "amountCents")]
    pub amount: Money,
}

/// Everything the projection needs, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    #[serde(default)]
    pub months_ahead: Option<u32>,
    #[serde(default)]
    pub starting_balance: Money,
    /// Flat monthly income assumption; derived from `income_history` when absent
    #[serde(default)]
    pub average_income: Option<Money>,
    #[serde(default)]
    pub income_history: Vec<MonthlyIncome>,
    #[serde(default)]
    pub pending_expenses: Vec<PendingExpense>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

/// One goal's share of a projected month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalAllocation {
    pub goal_id: GoalId,
    pub goal_name: String,
    #[serde(rename = "allocatedCents")]
    pub allocated: Money,
    #[serde(rename = "targetCents")]
    pub target: Money,
    /// Running total including this month's allocation
    #[serde(rename = "currentCents")]
    pub current: Money,
    pub percent_complete: u8,
    pub estimated_date: Option<NaiveDate>,
}

/// One simulated month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthProjection {
    pub competence: Competence,
    /// First day of the month
    pub month: NaiveDate,
    pub income_total: Money,
    pub expense_total: Money,
    /// Income minus expenses for this month alone
    pub balance: Money,
    pub cumulative_balance: Money,
    pub pending_installments: usize,
    pub goal_allocations: Vec<GoalAllocation>,
}

impl MonthProjection {
    /// Total assigned to goals this month
    pub fn total_allocated(&self) -> Money {
        self.goal_allocations.iter().map(|a| a.allocated).sum()
    }

    /// Whether the running balance went negative
    pub fn is_shortfall(&self) -> bool {
        self.cumulative_balance.is_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_input_defaults() {
        let input: ProjectionInput = serde_json::from_str("{}").unwrap();
        assert!(input.months_ahead.is_none());
        assert!(input.starting_balance.is_zero());
        assert!(input.goals.is_empty());
    }

    #[test]
    fn test_projection_input_from_yaml() {
        let yaml = r#"
monthsAhead: 6
startingBalance: 150000
averageIncome: 500000
pendingExpenses:
  - amountCents: 10000
    competenceAt: 2025-11-01
    isInstallment: true
goals:
  - id: house
    name: House
    targetCents: 10000000
    monthlyAllocation: 200000
    priority: 1
"#;
        let input: ProjectionInput = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(input.months_ahead, Some(6));
        assert_eq!(input.average_income, Some(Money::from_cents(500000)));
        assert_eq!(input.pending_expenses.len(), 1);
        assert_eq!(input.pending_expenses[0].competence().to_string(), "2025-11");
        assert_eq!(input.goals[0].priority, 1);
    }
}
