//! Category spending snapshot
//!
//! The budget guard reads one [`CategorySpending`] per category for the
//! period being analyzed.

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;
use super::money::Money;

/// Budget and actual spending of one category for a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category_id: CategoryId,
    pub category_name: String,
    #[serde(rename = "budgetCents", default)]
    pub budget: Option<Money>,
    #[serde(rename = "spentCents", default)]
    pub spent: Money,
}

impl CategorySpending {
    pub fn new(
        category_id: impl Into<CategoryId>,
        category_name: impl Into<String>,
        budget: Option<Money>,
        spent: Money,
    ) -> Self {
        Self {
            category_id: category_id.into(),
            category_name: category_name.into(),
            budget,
            spent,
        }
    }

    /// The budget, if one is set and positive
    pub fn effective_budget(&self) -> Option<Money> {
        self.budget.filter(|b| b.is_positive())
    }

    /// Budget left to spend, never negative; zero when there is no budget
    pub fn available(&self) -> Money {
        self.effective_budget()
            .map(|b| (b - self.spent).non_negative())
            .unwrap_or_default()
    }

    pub fn is_overspent(&self) -> bool {
        self.effective_budget().is_some_and(|b| self.spent > b)
    }
}
