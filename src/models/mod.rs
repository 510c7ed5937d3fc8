//! Core data models for cashplan
//!
//! Plain data exchanged with the caller: money, calendar keys, installment
//! schedules, goals, spending snapshots, projections and alerts.

pub mod alert;
pub mod budget;
pub mod calendar;
pub mod competence;
pub mod goal;
pub mod ids;
pub mod installment;
pub mod money;
pub mod projection;

pub use alert::{BudgetAlert, BudgetAlertKind, GoalAlert, GoalAlertKind};
pub use budget::CategorySpending;
pub use calendar::Clock;
pub use competence::Competence;
pub use goal::{Goal, GoalHealth, GoalStatus};
pub use ids::{CategoryId, GoalId, InstallmentGroupId};
pub use installment::{ExpandedInstallment, InstallmentInput, InstallmentSplit};
pub use money::Money;
pub use projection::{GoalAllocation, MonthProjection, MonthlyIncome, PendingExpense, ProjectionInput};
