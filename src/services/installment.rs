//! Installment expansion
//!
//! Splits one purchase into N monthly records whose amounts add back up to
//! the purchase total exactly. Any rounding slack goes to the first
//! installment so every later installment is the same predictable amount.

use chrono::Datelike;
use tracing::debug;

use crate::error::{PlanError, PlanResult};
use crate::models::calendar::{first_of_month, shift_months_clamped};
use crate::models::{ExpandedInstallment, InstallmentGroupId, InstallmentInput, InstallmentSplit, Money};

/// Largest number of installments a purchase can be split into
pub const MAX_INSTALLMENTS: u32 = 72;

fn validate_count(installments: u32) -> PlanResult<()> {
    if !(1..=MAX_INSTALLMENTS).contains(&installments) {
        return Err(PlanError::InvalidInstallmentCount {
            count: installments,
            max: MAX_INSTALLMENTS,
        });
    }
    Ok(())
}

/// Divide `total` into `installments` parts
///
/// # Examples
/// ```
/// use cashplan::models::Money;
/// use cashplan::services::installment::split_amount;
///
/// let split = split_amount(Money::from_cents(10001), 3).unwrap();
/// assert_eq!(split.base.cents(), 3333);
/// assert_eq!(split.first.cents(), 3335);
/// ```
pub fn split_amount(total: Money, installments: u32) -> PlanResult<InstallmentSplit> {
    validate_count(installments)?;

    let count = installments as i64;
    let base = total.div_floor(count);
    let remainder = Money::from_cents(total.cents() - base.cents() * count);

    Ok(InstallmentSplit {
        base,
        first: base + remainder,
    })
}

/// Expand a purchase into its monthly installments
///
/// Fails without producing anything when the count is outside
/// `1..=MAX_INSTALLMENTS`, the total is not positive, or the billing day
/// is outside 1-31.
pub fn expand(input: &InstallmentInput) -> PlanResult<Vec<ExpandedInstallment>> {
    validate_count(input.installments)?;

    if !input.total_amount.is_positive() {
        return Err(PlanError::InvalidAmount(input.total_amount));
    }

    let target_day = match input.day_of_month {
        Some(day) if !(1..=31).contains(&day) => {
            return Err(PlanError::Validation(format!(
                "Day of month must be between 1 and 31, got {}",
                day
            )));
        }
        Some(day) => day,
        None => input.start_date.day(),
    };

    let split = split_amount(input.total_amount, input.installments)?;
    let group_id = InstallmentGroupId::new();
    let total = input.installments;

    let expanded = (0..total)
        .map(|i| {
            let occurred_at = shift_months_clamped(input.start_date, i, target_day).ok_or_else(|| {
                PlanError::Validation(format!(
                    "Installment {} of '{}' falls outside the supported date range",
                    i + 1,
                    input.description
                ))
            })?;

            Ok(ExpandedInstallment {
                description: format!("{} ({}/{})", input.description, i + 1, total),
                amount: if i == 0 { split.first } else { split.base },
                occurred_at,
                competence_at: first_of_month(occurred_at),
                installment_group_id: group_id,
                installment_number: i + 1,
                installment_total: total,
                category_id: input.category_id.clone(),
                goal_id: input.goal_id.clone(),
            })
        })
        .collect::<PlanResult<Vec<_>>>()?;

    debug!(
        description = %input.description,
        total = input.total_amount.cents(),
        installments = total,
        group = %group_id,
        "expanded installment purchase"
    );

    Ok(expanded)
}
