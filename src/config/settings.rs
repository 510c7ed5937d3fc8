//! User settings for cashplan
//!
//! Holds the calendar timezone, currency symbol, projection horizon and the
//! policy thresholds used by the goal and budget analysis.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::paths::CashplanPaths;
use crate::error::PlanError;
use crate::models::Clock;
use crate::services::budget_guard::{
    BUDGET_WARNING_PERCENT, OVERSPEND_HEADROOM_PERCENT, UNDERUSED_PERCENT,
    UNDERUSED_RELEASE_PERCENT,
};
use crate::services::estimator::{AT_RISK_GRACE_DAYS, MAX_GRACE_DAYS};
use crate::services::guardian::AT_RISK_MAX_MONTHS_DELAYED;
use crate::services::projection::{DEFAULT_MONTHS_AHEAD, MAX_MONTHS_AHEAD};

/// Thresholds for goal health and budget analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Days past the target date an estimate may land and still be "at risk"
    #[serde(default = "default_grace_days")]
    pub at_risk_grace_days: i64,

    /// Largest delay, in months, still reported as "at risk" rather than "behind"
    #[serde(default = "default_max_months_delayed")]
    pub at_risk_max_months_delayed: i32,

    /// Percent of budget used that triggers a warning
    #[serde(default = "default_warning_percent")]
    pub budget_warning_percent: i64,

    /// Categories below this percent of use are candidates for cuts
    #[serde(default = "default_underused_percent")]
    pub underused_percent: i64,

    /// Headroom added over actual spend when suggesting a new budget
    #[serde(default = "default_headroom_percent")]
    pub overspend_headroom_percent: i64,

    /// Share of an underused category's slack that may be released
    #[serde(default = "default_release_percent")]
    pub underused_release_percent: i64,
}

fn default_grace_days() -> i64 {
    AT_RISK_GRACE_DAYS
}

fn default_max_months_delayed() -> i32 {
    AT_RISK_MAX_MONTHS_DELAYED
}

fn default_warning_percent() -> i64 {
    BUDGET_WARNING_PERCENT
}

fn default_underused_percent() -> i64 {
    UNDERUSED_PERCENT
}

fn default_headroom_percent() -> i64 {
    OVERSPEND_HEADROOM_PERCENT
}

fn default_release_percent() -> i64 {
    UNDERUSED_RELEASE_PERCENT
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            at_risk_grace_days: default_grace_days(),
            at_risk_max_months_delayed: default_max_months_delayed(),
            budget_warning_percent: default_warning_percent(),
            underused_percent: default_underused_percent(),
            overspend_headroom_percent: default_headroom_percent(),
            underused_release_percent: default_release_percent(),
        }
    }
}

/// User settings for cashplan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// IANA timezone that defines the local calendar day
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Currency symbol used in messages and tables
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Projection horizon when none is requested
    #[serde(default = "default_months_ahead")]
    pub default_months_ahead: u32,

    #[serde(default)]
    pub policy: PolicySettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_months_ahead() -> u32 {
    DEFAULT_MONTHS_AHEAD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            timezone: default_timezone(),
            currency_symbol: default_currency(),
            default_months_ahead: default_months_ahead(),
            policy: PolicySettings::default(),
        }
    }
}

impl Settings {
    /// Parse the configured timezone
    pub fn timezone(&self) -> Result<Tz, PlanError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| PlanError::Config(format!("Unknown timezone: {}", self.timezone)))
    }

    /// A clock that reads the local date in the configured timezone
    pub fn clock(&self) -> Result<Clock, PlanError> {
        Ok(Clock::new(self.timezone()?))
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<(), PlanError> {
        self.timezone()?;

        if !(1..=MAX_MONTHS_AHEAD).contains(&self.default_months_ahead) {
            return Err(PlanError::Config(format!(
                "default_months_ahead must be between 1 and {}",
                MAX_MONTHS_AHEAD
            )));
        }

        let percents = [
            ("budget_warning_percent", self.policy.budget_warning_percent),
            ("underused_percent", self.policy.underused_percent),
            ("underused_release_percent", self.policy.underused_release_percent),
        ];
        for (name, value) in percents {
            if !(0..=100).contains(&value) {
                return Err(PlanError::Config(format!(
                    "{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }

        if self.policy.at_risk_grace_days > MAX_GRACE_DAYS {
            return Err(PlanError::Config(format!(
                "at_risk_grace_days must be at most {}, got {}",
                MAX_GRACE_DAYS, self.policy.at_risk_grace_days
            )));
        }

        if self.policy.overspend_headroom_percent < 0
            || self.policy.at_risk_grace_days < 0
            || self.policy.at_risk_max_months_delayed < 0
        {
            return Err(PlanError::Config("Policy values cannot be negative".into()));
        }

        Ok(())
    }

    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &CashplanPaths) -> Result<Self, PlanError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PlanError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| PlanError::Config(format!("Failed to parse settings file: {}", e)))?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashplanPaths) -> Result<(), PlanError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PlanError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| PlanError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
