//! Goal guardian
//!
//! Turns goal snapshots into health alerts and flags allocation conflicts.
//! The conflict check only compares neighbours in target-date order; it
//! does not build a dependency graph between goals.

use tracing::{debug, warn};

use crate::config::Settings;
use crate::models::calendar::months_between;
use crate::models::{Goal, GoalAlert, GoalAlertKind, Money};

/// Largest delay, in whole months, still reported as "at risk"
pub const AT_RISK_MAX_MONTHS_DELAYED: i32 = 2;

/// Aggregates goal health and detects conflicts between goals
#[derive(Debug, Clone)]
pub struct GoalGuardian {
    max_months_delayed: i32,
    currency_symbol: String,
}

impl Default for GoalGuardian {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalGuardian {
    pub fn new() -> Self {
        Self {
            max_months_delayed: AT_RISK_MAX_MONTHS_DELAYED,
            currency_symbol: "$".to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_months_delayed: settings.policy.at_risk_max_months_delayed,
            currency_symbol: settings.currency_symbol.clone(),
        }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// One alert per goal that has something to report, most severe first
    ///
    /// Goals keep their input order within a severity class.
    pub fn analyze_health(&self, goals: &[Goal]) -> Vec<GoalAlert> {
        let mut alerts: Vec<GoalAlert> = goals.iter().filter_map(|g| self.evaluate(g)).collect();
        alerts.sort_by_key(|a| a.kind);

        debug!(
            goals = goals.len(),
            alerts = alerts.len(),
            behind = alerts.iter().filter(|a| a.kind == GoalAlertKind::Behind).count(),
            "analyzed goal health"
        );
        alerts
    }

    fn evaluate(&self, goal: &Goal) -> Option<GoalAlert> {
        let alert = |kind, message: String, months_delayed| GoalAlert {
            kind,
            goal_id: goal.id.clone(),
            goal_name: goal.name.clone(),
            message,
            original_date: goal.target_date,
            estimated_date: goal.estimated_date,
            months_delayed,
        };

        match (goal.target_date, goal.estimated_date) {
            (None, None) => None,
            (None, Some(estimated)) => Some(alert(
                GoalAlertKind::OnTrack,
                format!("No target date set. Estimated completion: {}.", estimated),
                0,
            )),
            (Some(_), None) => Some(alert(
                GoalAlertKind::AtRisk,
                "No monthly allocation set. Cannot forecast completion.".to_string(),
                0,
            )),
            (Some(target), Some(estimated)) => {
                let months_delayed = months_between(estimated, target);
                if months_delayed <= 0 {
                    Some(alert(
                        GoalAlertKind::OnTrack,
                        "Goal is on track to be reached on time.".to_string(),
                        0,
                    ))
                } else if months_delayed <= self.max_months_delayed {
                    Some(alert(
                        GoalAlertKind::AtRisk,
                        format!(
                            "Goal is forecast {} month(s) late. Consider increasing the monthly allocation.",
                            months_delayed
                        ),
                        months_delayed,
                    ))
                } else {
                    Some(alert(
                        GoalAlertKind::Behind,
                        format!(
                            "Goal is {} months behind schedule. Urgent action needed.",
                            months_delayed
                        ),
                        months_delayed,
                    ))
                }
            }
        }
    }

    /// Warnings about goals competing for the same money
    pub fn check_conflicts(&self, goals: &[Goal], available_balance: Money) -> Vec<String> {
        let mut warnings = Vec::new();

        let total_allocation: Money = goals.iter().map(|g| g.allocation_or_zero()).sum();
        if total_allocation > available_balance {
            let deficit = total_allocation - available_balance;
            warn!(
                total = total_allocation.cents(),
                available = available_balance.cents(),
                "goal allocations exceed available balance"
            );
            warnings.push(format!(
                "Total monthly allocation ({}) exceeds the available balance ({}) by {}.",
                self.money(total_allocation),
                self.money(available_balance),
                self.money(deficit)
            ));
        }

        let mut by_target: Vec<&Goal> = goals.iter().collect();
        by_target.sort_by_key(|g| (g.target_date.is_none(), g.target_date));

        for pair in by_target.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            if let (Some(estimated), Some(later_target)) = (earlier.estimated_date, later.target_date) {
                if estimated > later_target {
                    warnings.push(format!(
                        "Goal \"{}\" may delay goal \"{}\".",
                        earlier.name, later.name
                    ));
                }
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(id: &str) -> Goal {
        Goal::new(id, id.to_uppercase(), Money::from_cents(100000))
    }

    #[test]
    fn test_open_ended_goal_has_no_alert() {
        let alerts = GoalGuardian::new().analyze_health(&[goal("free")]);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_estimate_without_target_is_informational() {
        let g = goal("a").with_estimated_date(date(2026, 3, 1));
        let alerts = GoalGuardian::new().analyze_health(&[g]);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, GoalAlertKind::OnTrack);
        assert!(alerts[0].message.contains("2026-03-01"));
        assert_eq!(alerts[0].original_date, None);
    }

    #[test]
    fn test_target_without_estimate_is_at_risk() {
        let g = goal("a").with_target_date(date(2026, 3, 1));
        let alerts = GoalGuardian::new().analyze_health(&[g]);

        assert_eq!(alerts[0].kind, GoalAlertKind::AtRisk);
        assert!(alerts[0].message.contains("Cannot forecast"));
        assert_eq!(alerts[0].months_delayed, 0);
    }

    #[test]
    fn test_delay_classification() {
        let target = date(2026, 1, 15);
        let guardian = GoalGuardian::new();
        let classify = |estimated| {
            let g = goal("a").with_target_date(target).with_estimated_date(estimated);
            let alert = guardian.analyze_health(&[g]).remove(0);
            (alert.kind, alert.months_delayed)
        };

        assert_eq!(classify(date(2025, 12, 1)), (GoalAlertKind::OnTrack, 0));
        assert_eq!(classify(date(2026, 2, 10)), (GoalAlertKind::OnTrack, 0));
        assert_eq!(classify(date(2026, 2, 15)), (GoalAlertKind::AtRisk, 1));
        assert_eq!(classify(date(2026, 3, 20)), (GoalAlertKind::AtRisk, 2));
        assert_eq!(classify(date(2026, 4, 15)), (GoalAlertKind::Behind, 3));
    }

    #[test]
    fn test_end_of_month_estimate_counts_full_months_only() {
        let g = goal("a")
            .with_target_date(date(2026, 1, 31))
            .with_estimated_date(date(2026, 4, 30));
        let alert = GoalGuardian::new().analyze_health(&[g]).remove(0);

        assert_eq!(alert.months_delayed, 2);
        assert_eq!(alert.kind, GoalAlertKind::AtRisk);
    }

    #[test]
    fn test_alerts_sorted_by_severity_then_input_order() {
        let target = date(2026, 1, 1);
        let goals = vec![
            goal("ok1").with_target_date(target).with_estimated_date(target),
            goal("late").with_target_date(target).with_estimated_date(date(2026, 9, 1)),
            goal("risky").with_target_date(target),
            goal("ok2").with_estimated_date(target),
        ];

        let alerts = GoalGuardian::new().analyze_health(&goals);
        let order: Vec<&str> = alerts.iter().map(|a| a.goal_id.as_str()).collect();
        assert_eq!(order, vec!["late", "risky", "ok1", "ok2"]);
    }

    #[test]
    fn test_over_allocation_warning() {
        let goals = vec![
            goal("a").with_monthly_allocation(Money::from_cents(60000)),
            goal("b").with_monthly_allocation(Money::from_cents(50000)),
            goal("c"),
        ];

        let warnings = GoalGuardian::new().check_conflicts(&goals, Money::from_cents(100000));
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0],
            "Total monthly allocation ($1100.00) exceeds the available balance ($1000.00) by $100.00."
        );

        assert!(GoalGuardian::new()
            .check_conflicts(&goals, Money::from_cents(110000))
            .is_empty());
    }

    #[test]
    fn test_adjacent_goal_conflict() {
        let goals = vec![
            // Listed out of order on purpose; sorting puts "first" ahead
            goal("second").with_target_date(date(2026, 6, 1)),
            goal("first")
                .with_target_date(date(2026, 3, 1))
                .with_estimated_date(date(2026, 8, 1)),
            goal("open").with_estimated_date(date(2027, 1, 1)),
        ];

        let warnings = GoalGuardian::new().check_conflicts(&goals, Money::from_cents(1_000_000));
        assert_eq!(warnings, vec!["Goal \"FIRST\" may delay goal \"SECOND\".".to_string()]);
    }

    #[test]
    fn test_settings_drive_thresholds_and_currency() {
        let mut settings = Settings::default();
        settings.policy.at_risk_max_months_delayed = 4;
        let guardian = GoalGuardian::from_settings(&settings);

        let g = goal("a")
            .with_target_date(date(2026, 1, 1))
            .with_estimated_date(date(2026, 4, 1));
        assert_eq!(guardian.analyze_health(&[g]).remove(0).kind, GoalAlertKind::AtRisk);

        let greedy = goal("b").with_monthly_allocation(Money::from_cents(500));
        let warnings = guardian.check_conflicts(&[greedy], Money::zero());
        assert!(warnings[0].contains("R$5.00"));
    }
}
