//! Savings goal model
//!
//! The core only reads goal snapshots handed in by the caller. The one
//! mutation it offers is [`Goal::allocate`], which applies a contribution
//! and moves the goal to `Completed` once it reaches its target.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;
use crate::error::{PlanError, PlanResult};

/// Priority assigned to goals that do not specify one
pub const DEFAULT_GOAL_PRIORITY: i32 = 5;

/// Lifecycle state of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Paused => write!(f, "Paused"),
            Self::Completed => write!(f, "Completed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Health of a goal relative to its target date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalHealth {
    NoTarget,
    AtRisk,
    Behind,
    OnTrack,
}

impl fmt::Display for GoalHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTarget => write!(f, "No target"),
            Self::AtRisk => write!(f, "At risk"),
            Self::Behind => write!(f, "Behind"),
            Self::OnTrack => write!(f, "On track"),
        }
    }
}

/// A savings goal snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    #[serde(rename = "targetCents")]
    pub target: Money,
    #[serde(rename = "currentCents", default)]
    pub current: Money,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_date: Option<NaiveDate>,
    #[serde(default)]
    pub monthly_allocation: Option<Money>,
    /// Lower number = higher priority
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub status: GoalStatus,
}

fn default_priority() -> i32 {
    DEFAULT_GOAL_PRIORITY
}

impl Goal {
    pub fn new(id: impl Into<GoalId>, name: impl Into<String>, target: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target,
            current: Money::zero(),
            target_date: None,
            estimated_date: None,
            monthly_allocation: None,
            priority: DEFAULT_GOAL_PRIORITY,
            status: GoalStatus::Active,
        }
    }

    pub fn with_current(mut self, current: Money) -> Self {
        self.current = current;
        self
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_estimated_date(mut self, date: NaiveDate) -> Self {
        self.estimated_date = Some(date);
        self
    }

    pub fn with_monthly_allocation(mut self, amount: Money) -> Self {
        self.monthly_allocation = Some(amount);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: GoalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    pub fn is_reached(&self) -> bool {
        self.current >= self.target
    }

    /// Amount still missing to reach the target
    pub fn remaining(&self) -> Money {
        (self.target - self.current).non_negative()
    }

    /// Monthly allocation, treating an unset value as zero
    pub fn allocation_or_zero(&self) -> Money {
        self.monthly_allocation.unwrap_or_default()
    }

    /// Progress toward the target as a whole percentage, clamped to 0-100
    pub fn percent_complete(&self) -> u8 {
        percent_complete(self.current, self.target)
    }

    /// Contribute to the goal
    ///
    /// Only active goals accept contributions. Reaching the target marks
    /// the goal completed.
    pub fn allocate(&mut self, amount: Money) -> PlanResult<()> {
        if !amount.is_positive() {
            return Err(PlanError::InvalidAmount(amount));
        }
        if !self.is_active() {
            return Err(PlanError::GoalNotActive(self.name.clone()));
        }

        self.current += amount;
        if self.is_reached() {
            self.status = GoalStatus::Completed;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.current.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }
        if self.allocation_or_zero().is_negative() {
            return Err(GoalValidationError::NegativeAllocation);
        }
        Ok(())
    }
}

/// Whole-percent progress of `current` toward `target`, clamped to 0-100
pub fn percent_complete(current: Money, target: Money) -> u8 {
    if !target.is_positive() {
        return 100;
    }
    current
        .non_negative()
        .whole_percent_of(target)
        .clamp(0, 100) as u8
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
    NegativeCurrent,
    NegativeAllocation,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Goal target must be greater than zero"),
            Self::NegativeCurrent => write!(f, "Goal progress cannot be negative"),
            Self::NegativeAllocation => write!(f, "Monthly allocation cannot be negative"),
        }
    }
}

impl std::error::Error for GoalValidationError {}
