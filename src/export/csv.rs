//! CSV export
//!
//! Writes installment schedules and projections in a spreadsheet-friendly
//! layout. Amounts are plain decimals without a currency symbol.

use std::io::Write;

use serde::Serialize;

use crate::error::PlanResult;
use crate::models::{ExpandedInstallment, Money, MonthProjection};

fn decimal(amount: Money) -> String {
    amount.format_with_symbol("")
}

#[derive(Serialize)]
struct ScheduleRecord<'a> {
    number: u32,
    total: u32,
    description: &'a str,
    date: String,
    competence: String,
    amount: String,
    group_id: String,
    category_id: &'a str,
    goal_id: &'a str,
}

#[derive(Serialize)]
struct ProjectionRecord {
    competence: String,
    income: String,
    expenses: String,
    balance: String,
    cumulative_balance: String,
    pending_installments: usize,
    allocated_to_goals: String,
}

/// Export an expanded installment schedule to CSV
pub fn export_schedule_csv<W: Write>(installments: &[ExpandedInstallment], writer: W) -> PlanResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for item in installments {
        wtr.serialize(ScheduleRecord {
            number: item.installment_number,
            total: item.installment_total,
            description: &item.description,
            date: item.occurred_at.to_string(),
            competence: item.competence().to_string(),
            amount: decimal(item.amount),
            group_id: item.installment_group_id.to_string(),
            category_id: item.category_id.as_ref().map(|c| c.as_str()).unwrap_or(""),
            goal_id: item.goal_id.as_ref().map(|g| g.as_str()).unwrap_or(""),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export a month-by-month projection to CSV
pub fn export_projection_csv<W: Write>(months: &[MonthProjection], writer: W) -> PlanResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for month in months {
        wtr.serialize(ProjectionRecord {
            competence: month.competence.to_string(),
            income: decimal(month.income_total),
            expenses: decimal(month.expense_total),
            balance: decimal(month.balance),
            cumulative_balance: decimal(month.cumulative_balance),
            pending_installments: month.pending_installments,
            allocated_to_goals: decimal(month.total_allocated()),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Clock, InstallmentInput};
    use crate::services::installment::expand;
    use crate::services::projection::ProjectionCalculator;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_export_schedule_csv() {
        let input = InstallmentInput::new("TV, 55\"", Money::from_cents(10001), 3, date(2025, 1, 31))
            .with_category(CategoryId::from("electronics"));
        let schedule = expand(&input).unwrap();

        let mut output = Vec::new();
        export_schedule_csv(&schedule, &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();

        assert_eq!(
            lines[0],
            "number,total,description,date,competence,amount,group_id,category_id,goal_id"
        );
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,3,\"TV, 55\"\" (1/3)\",2025-01-31,2025-01,33.35,"));
        assert!(lines[2].contains("2025-02-28,2025-02,33.33"));
        assert!(lines[3].ends_with(",electronics,"));
    }

    #[test]
    fn test_export_projection_csv() {
        let calc = ProjectionCalculator::new(&Clock::fixed(date(2025, 10, 19)));
        let months = calc.calculate(2, Money::from_cents(-500), Money::from_cents(200), &[], &[]);

        let mut output = Vec::new();
        export_projection_csv(&months, &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();

        assert_eq!(
            lines[0],
            "competence,income,expenses,balance,cumulative_balance,pending_installments,allocated_to_goals"
        );
        assert_eq!(lines[1], "2025-10,2.00,0.00,2.00,-3.00,0,0.00");
        assert_eq!(lines[2], "2025-11,2.00,0.00,2.00,-1.00,0,0.00");
    }
}
