//! Installment schedule display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::{ExpandedInstallment, InstallmentSplit, Money};

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Competence")]
    competence: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format an expanded purchase as a table with a total line
pub fn format_schedule(installments: &[ExpandedInstallment], symbol: &str) -> String {
    let Some(first) = installments.first() else {
        return "No installments.".to_string();
    };

    let rows: Vec<ScheduleRow> = installments
        .iter()
        .map(|i| ScheduleRow {
            number: format!("{}/{}", i.installment_number, i.installment_total),
            date: i.occurred_at.to_string(),
            competence: i.competence().to_string(),
            description: truncate(&i.description, 40),
            amount: i.amount.format_with_symbol(symbol),
        })
        .collect();

    let total: Money = installments.iter().map(|i| i.amount).sum();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output.push_str(&format!("Group: {}\n", first.installment_group_id.short()));
    output.push_str(&format!("Total: {}\n", total.format_with_symbol(symbol)));
    output
}

/// Format the result of splitting a total into `count` parts
pub fn format_split(total: Money, count: u32, split: &InstallmentSplit, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} in {} installments\n",
        total.format_with_symbol(symbol),
        count
    ));
    output.push_str(&format!("  First:     {}\n", split.first.format_with_symbol(symbol)));
    if count > 1 {
        output.push_str(&format!(
            "  Remaining: {} x {}\n",
            count - 1,
            split.base.format_with_symbol(symbol)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstallmentInput;
    use crate::services::installment::{expand, split_amount};
    use chrono::NaiveDate;

    #[test]
    fn test_format_schedule() {
        let input = InstallmentInput::new(
            "Laptop",
            Money::from_cents(10001),
            3,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        );
        let schedule = expand(&input).unwrap();
        let output = format_schedule(&schedule, "R$");

        assert!(output.contains("Laptop (1/3)"));
        assert!(output.contains("R$33.35"));
        assert!(output.contains("2025-03"));
        assert!(output.contains("Total: R$100.01"));
        assert!(output.contains("Group: grp-"));
    }

    #[test]
    fn test_format_empty_schedule() {
        assert_eq!(format_schedule(&[], "$"), "No installments.");
    }

    #[test]
    fn test_format_split() {
        let split = split_amount(Money::from_cents(10001), 3).unwrap();
        let output = format_split(Money::from_cents(10001), 3, &split, "$");

        assert!(output.contains("First:     $33.35"));
        assert!(output.contains("Remaining: 2 x $33.33"));

        let single = split_amount(Money::from_cents(500), 1).unwrap();
        assert!(!format_split(Money::from_cents(500), 1, &single, "$").contains("Remaining"));
    }
}
