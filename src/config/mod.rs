//! Configuration module for cashplan
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Policy thresholds for goal and budget analysis

pub mod paths;
pub mod settings;

pub use paths::CashplanPaths;
pub use settings::{PolicySettings, Settings};
