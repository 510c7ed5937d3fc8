//! Alert display formatting
//!
//! Formats goal and budget findings as short labelled lines.

use std::collections::BTreeMap;

use super::report::format_optional_date;
use crate::models::{BudgetAlert, CategoryId, CategorySpending, GoalAlert, GoalAlertKind, Money};

/// Format goal health alerts, one block per goal
pub fn format_goal_alerts(alerts: &[GoalAlert]) -> String {
    if alerts.is_empty() {
        return "No goal alerts.".to_string();
    }

    let mut output = String::new();
    for alert in alerts {
        output.push_str(&format!("[{}] {}\n", alert.kind, alert.goal_name));
        output.push_str(&format!("  {}\n", alert.message));
        if alert.kind != GoalAlertKind::OnTrack || alert.original_date.is_some() {
            output.push_str(&format!(
                "  Target: {}  Estimate: {}\n",
                format_optional_date(alert.original_date),
                format_optional_date(alert.estimated_date)
            ));
        }
    }
    output
}

/// Format budget alerts as a column list
pub fn format_budget_alerts(alerts: &[BudgetAlert], symbol: &str) -> String {
    if alerts.is_empty() {
        return "All categories within budget.".to_string();
    }

    let name_width = alerts
        .iter()
        .map(|a| a.category_name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<name_width$}  {:>12}  {:>12}  {:>5}\n",
        "Status",
        "Category",
        "Budget",
        "Spent",
        "Used",
        name_width = name_width,
    ));
    for alert in alerts {
        output.push_str(&format!(
            "{:<8}  {:<name_width$}  {:>12}  {:>12}  {:>4}%\n",
            alert.kind.to_string(),
            alert.category_name,
            alert.budget.format_with_symbol(symbol),
            alert.spent.format_with_symbol(symbol),
            alert.percent_used,
            name_width = name_width,
        ));
    }
    output.push('\n');
    for alert in alerts {
        output.push_str(&format!("  {}\n", alert.message));
    }
    output
}

/// Format suggested budgets next to the current ones
pub fn format_suggestions(
    suggestions: &BTreeMap<CategoryId, Money>,
    categories: &[CategorySpending],
    symbol: &str,
) -> String {
    if suggestions.is_empty() {
        return "No budget changes suggested.".to_string();
    }

    let mut output = String::from("Suggested budgets:\n");
    for (category_id, suggested) in suggestions {
        let category = categories.iter().find(|c| &c.category_id == category_id);
        let name = category
            .map(|c| c.category_name.as_str())
            .unwrap_or(category_id.as_str());
        let current = category
            .and_then(|c| c.budget)
            .map(|b| b.format_with_symbol(symbol))
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "  {}: {} -> {}\n",
            name,
            current,
            suggested.format_with_symbol(symbol)
        ));
    }
    output
}

/// Format free-text warnings as a bulleted list
pub fn format_warnings(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return "No conflicts found.".to_string();
    }
    warnings.iter().map(|w| format!("! {}\n", w)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::budget_guard::BudgetGuard;
    use crate::services::guardian::GoalGuardian;
    use crate::models::Goal;
    use chrono::NaiveDate;

    #[test]
    fn test_format_goal_alerts() {
        let goal = Goal::new("house", "House", Money::from_cents(100000))
            .with_target_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let alerts = GoalGuardian::new().analyze_health(&[goal]);
        let output = format_goal_alerts(&alerts);

        assert!(output.starts_with("[AT_RISK] House"));
        assert!(output.contains("Target: 2026-01-01  Estimate: -"));
        assert_eq!(format_goal_alerts(&[]), "No goal alerts.");
    }

    #[test]
    fn test_format_budget_alerts() {
        let categories = vec![CategorySpending::new(
            "food",
            "Groceries",
            Some(Money::from_cents(10000)),
            Money::from_cents(12000),
        )];
        let alerts = BudgetGuard::new().analyze_budget(&categories);
        let output = format_budget_alerts(&alerts, "$");

        assert!(output.contains("EXCEEDED"));
        assert!(output.contains("Groceries"));
        assert!(output.contains("120%"));
        assert!(output.contains("Groceries budget exceeded by $20.00."));
    }

    #[test]
    fn test_format_suggestions() {
        let categories = vec![CategorySpending::new(
            "food",
            "Groceries",
            Some(Money::from_cents(10000)),
            Money::from_cents(12000),
        )];
        let suggestions = BudgetGuard::new().suggest_adjustment(&categories, Money::zero());
        let output = format_suggestions(&suggestions, &categories, "$");

        assert!(output.contains("Groceries: $100.00 -> $132.00"));
    }

    #[test]
    fn test_format_warnings() {
        assert_eq!(format_warnings(&["late".to_string()]), "! late\n");
        assert_eq!(format_warnings(&[]), "No conflicts found.");
    }
}
