//! Export module for cashplan
//!
//! CSV output for schedules and projections. JSON output goes straight
//! through serde in the binary.

pub mod csv;

pub use self::csv::{export_projection_csv, export_schedule_csv};
