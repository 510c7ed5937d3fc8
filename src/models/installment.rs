//! Installment models
//!
//! An installment purchase is described once by an [`InstallmentInput`] and
//! materialized as one [`ExpandedInstallment`] per month.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::competence::Competence;
use super::ids::{CategoryId, GoalId, InstallmentGroupId};
use super::money::Money;

/// A purchase to be split across monthly installments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentInput {
    pub description: String,
    #[serde(rename = "totalAmountCents")]
    pub total_amount: Money,
    pub installments: u32,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<GoalId>,
    /// Billing day override; defaults to the start date's day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

impl InstallmentInput {
    pub fn new(
        description: impl Into<String>,
        total_amount: Money,
        installments: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            total_amount,
            installments,
            start_date,
            category_id: None,
            goal_id: None,
            day_of_month: None,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_goal(mut self, goal_id: GoalId) -> Self {
        self.goal_id = Some(goal_id);
        self
    }

    pub fn with_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }
}

/// One dated slice of an installment purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedInstallment {
    /// Original description with an ` (i/N)` suffix
    pub description: String,
    #[serde(rename = "amountCents")]
    pub amount: Money,
    pub occurred_at: NaiveDate,
    /// First day of the accounting month of `occurred_at`
    pub competence_at: NaiveDate,
    pub installment_group_id: InstallmentGroupId,
    pub installment_number: u32,
    pub installment_total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<GoalId>,
}

impl ExpandedInstallment {
    pub fn competence(&self) -> Competence {
        Competence::from_date(self.competence_at)
    }

    pub fn is_first(&self) -> bool {
        self.installment_number == 1
    }

    pub fn is_last(&self) -> bool {
        self.installment_number == self.installment_total
    }
}

/// How a total divides into installments
///
/// Every installment gets `base`; the first one also absorbs the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentSplit {
    #[serde(rename = "baseAmount")]
    pub base: Money,
    #[serde(rename = "firstAmount")]
    pub first: Money,
}

impl InstallmentSplit {
    /// Cents added to the first installment on top of the base
    pub fn remainder(&self) -> Money {
        self.first - self.base
    }
}
