//! Service layer for cashplan
//!
//! The services are pure calculations over caller-supplied snapshots. None
//! of them read the system clock directly; date-dependent services take a
//! [`Clock`](crate::models::Clock) when they are built.

pub mod budget_guard;
pub mod estimator;
pub mod guardian;
pub mod installment;
pub mod projection;

pub use budget_guard::BudgetGuard;
pub use estimator::GoalEstimator;
pub use guardian::GoalGuardian;
pub use installment::{expand, split_amount, MAX_INSTALLMENTS};
pub use projection::{average_monthly_income, ProjectionCalculator};
