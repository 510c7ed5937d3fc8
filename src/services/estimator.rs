//! Goal completion estimates and health classification

use chrono::{Duration, NaiveDate};
use tracing::trace;

use crate::config::Settings;
use crate::models::calendar::{calendar_months_between, first_of_month_after};
use crate::models::{Clock, Goal, GoalHealth, Money};

/// Days an estimate may overshoot the target date and still count as "at risk"
pub const AT_RISK_GRACE_DAYS: i64 = 30;

/// Largest configurable grace window, ten years
pub const MAX_GRACE_DAYS: i64 = 3650;

/// Estimates when goals will be reached and whether that is on time
#[derive(Debug, Clone, Copy)]
pub struct GoalEstimator {
    today: NaiveDate,
    grace_days: i64,
}

impl GoalEstimator {
    pub fn new(clock: &Clock) -> Self {
        Self {
            today: clock.today(),
            grace_days: AT_RISK_GRACE_DAYS,
        }
    }

    pub fn from_settings(settings: &Settings, clock: &Clock) -> Self {
        Self::new(clock).with_grace_days(settings.policy.at_risk_grace_days)
    }

    pub fn with_grace_days(mut self, days: i64) -> Self {
        self.grace_days = days;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Projected completion date for a goal
    ///
    /// A goal that is already funded completes today whatever its
    /// allocation. Otherwise a non-positive allocation cannot be forecast.
    /// The estimate is the first day of the month in which the last needed
    /// contribution lands.
    pub fn estimate_completion(
        &self,
        target: Money,
        current: Money,
        monthly_allocation: Money,
    ) -> Option<NaiveDate> {
        if current >= target {
            return Some(self.today);
        }
        if !monthly_allocation.is_positive() {
            return None;
        }

        let months_needed = (target - current).div_ceil(monthly_allocation.cents()).cents();
        let months_needed = u32::try_from(months_needed).ok()?;
        first_of_month_after(self.today, months_needed)
    }

    /// Monthly contribution needed to reach `target` by `target_date`
    ///
    /// When the target date is today or already past, the whole remaining
    /// gap is due at once. Rounds up so the schedule never falls short.
    pub fn required_monthly_allocation(
        &self,
        target: Money,
        current: Money,
        target_date: NaiveDate,
    ) -> Money {
        let remaining = (target - current).non_negative();
        if target_date <= self.today || remaining.is_zero() {
            return remaining;
        }

        let months = calendar_months_between(target_date, self.today).max(1);
        remaining.div_ceil(months as i64)
    }

    /// Classify a goal from its target date and completion estimate
    pub fn health_status(
        &self,
        target_date: Option<NaiveDate>,
        estimated_date: Option<NaiveDate>,
    ) -> GoalHealth {
        let Some(target) = target_date else {
            return GoalHealth::NoTarget;
        };
        let Some(estimated) = estimated_date else {
            return GoalHealth::AtRisk;
        };

        // A window running past the calendar's end covers every estimate
        let within_grace = Duration::try_days(self.grace_days)
            .and_then(|grace| target.checked_add_signed(grace))
            .map_or(true, |limit| estimated <= limit);

        if estimated <= target {
            GoalHealth::OnTrack
        } else if within_grace {
            GoalHealth::AtRisk
        } else {
            GoalHealth::Behind
        }
    }

    /// Recompute a goal's stored estimate after its target or allocation changed
    ///
    /// Goals without a positive allocation are left without an estimate.
    pub fn refresh(&self, goal: &Goal) -> Goal {
        let mut refreshed = goal.clone();
        refreshed.estimated_date = match goal.monthly_allocation {
            Some(allocation) if allocation.is_positive() => {
                self.estimate_completion(goal.target, goal.current, allocation)
            }
            _ => None,
        };
        trace!(goal = %goal.id, estimate = ?refreshed.estimated_date, "refreshed goal estimate");
        refreshed
    }
}
