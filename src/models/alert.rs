//! Derived alert records
//!
//! Alerts are read-only classifications produced by the budget guard and
//! the goal guardian. They are never persisted by the core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, GoalId};
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetAlertKind {
    Warning,
    Exceeded,
}

impl fmt::Display for BudgetAlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Exceeded => write!(f, "EXCEEDED"),
        }
    }
}

/// A category close to or over its budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    #[serde(rename = "type")]
    pub kind: BudgetAlertKind,
    pub category_id: CategoryId,
    pub category_name: String,
    #[serde(rename = "budgetCents")]
    pub budget: Money,
    #[serde(rename = "spentCents")]
    pub spent: Money,
    /// Rounded to a whole percent
    pub percent_used: i64,
    pub message: String,
}

/// Goal alert classes, declared in severity order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalAlertKind {
    Behind,
    AtRisk,
    OnTrack,
}

impl fmt::Display for GoalAlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Behind => write!(f, "BEHIND"),
            Self::AtRisk => write!(f, "AT_RISK"),
            Self::OnTrack => write!(f, "ON_TRACK"),
        }
    }
}

/// Health finding for one goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalAlert {
    #[serde(rename = "type")]
    pub kind: GoalAlertKind,
    pub goal_id: GoalId,
    pub goal_name: String,
    pub message: String,
    pub original_date: Option<NaiveDate>,
    pub estimated_date: Option<NaiveDate>,
    pub months_delayed: i32,
}
