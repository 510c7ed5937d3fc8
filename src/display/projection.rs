//! Projection display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, format_optional_date, separator};
use crate::models::MonthProjection;

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
    #[tabled(rename = "Installments")]
    installments: usize,
    #[tabled(rename = "To goals")]
    allocated: String,
}

/// Format a projection as a month table followed by goal progress
pub fn format_projection(months: &[MonthProjection], symbol: &str) -> String {
    if months.is_empty() {
        return "No months projected.".to_string();
    }

    let rows: Vec<MonthRow> = months
        .iter()
        .map(|m| MonthRow {
            month: m.competence.to_string(),
            income: m.income_total.format_with_symbol(symbol),
            expenses: m.expense_total.format_with_symbol(symbol),
            balance: m.balance.format_with_symbol(symbol),
            cumulative: m.cumulative_balance.format_with_symbol(symbol),
            installments: m.pending_installments,
            allocated: m.total_allocated().format_with_symbol(symbol),
        })
        .collect();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');

    let shortfalls: Vec<String> = months
        .iter()
        .filter(|m| m.is_shortfall())
        .map(|m| m.competence.to_string())
        .collect();
    if !shortfalls.is_empty() {
        output.push_str(&format!("\nShortfall in: {}\n", shortfalls.join(", ")));
    }

    // Goal state at the end of the horizon
    if let Some(last) = months.last().filter(|m| !m.goal_allocations.is_empty()) {
        output.push_str(&format!("\nGoals by {}\n", last.competence));
        output.push_str(&separator(60));
        output.push('\n');
        for goal in &last.goal_allocations {
            output.push_str(&format!(
                "  {:<20} {} {:>3}%  {} / {}  est. {}\n",
                goal.goal_name,
                format_bar(goal.percent_complete, 10),
                goal.percent_complete,
                goal.current.format_with_symbol(symbol),
                goal.target.format_with_symbol(symbol),
                format_optional_date(goal.estimated_date),
            ));
        }
    }

    output
}
