//! cashplan - installment, goal and cash-flow planning engine
//!
//! This library splits purchases into monthly installments whose amounts
//! add back up exactly, forecasts when savings goals will be reached, flags
//! goals and budget categories that need attention, and projects the cash
//! flow of the coming months. All amounts are integer cents.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, competence, goals, projections, etc.)
//! - `services`: Calculation layer
//! - `display`: Terminal formatting
//! - `export`: CSV export
//! - `cli`: Command handlers for the `cashplan` binary
//!
//! # Example
//!
//! ```
//! use cashplan::models::{Clock, Goal, Money};
//! use cashplan::services::GoalEstimator;
//! use chrono::NaiveDate;
//!
//! let clock = Clock::fixed(NaiveDate::from_ymd_opt(2025, 10, 19).unwrap());
//! let estimator = GoalEstimator::new(&clock);
//!
//! let estimate = estimator.estimate_completion(
//!     Money::from_cents(10000),
//!     Money::zero(),
//!     Money::from_cents(3000),
//! );
//! assert_eq!(estimate, NaiveDate::from_ymd_opt(2026, 2, 1));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;

pub use error::{PlanError, PlanResult};
