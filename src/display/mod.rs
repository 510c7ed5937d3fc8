//! Display formatting for terminal output
//!
//! Turns schedules, projections and alerts into plain text. Every
//! formatter takes the currency symbol explicitly so output follows the
//! user's settings.

pub mod alert;
pub mod installment;
pub mod projection;
pub mod report;

pub use alert::{format_budget_alerts, format_goal_alerts, format_suggestions, format_warnings};
pub use installment::{format_schedule, format_split};
pub use projection::format_projection;
