use crate::error::PlannerResult;
use crate::holidays::{BufferPolicy, BufferRule};
use crate::lead_time::LeadTimes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming a TOML config file for the binaries.
pub const CONFIG_ENV_VAR: &str = "TA_PLANNER_CONFIG";

/// Planner settings, loaded from TOML. Every field has a default so an empty
/// file (or no file) reproduces the standard lead-time chain.
///
/// ```toml
/// earliest_in_store_date = "2025-01-01"
/// delay_warning_threshold = 5
/// holiday_file = "factory_holidays.csv"
///
/// [lead_times]
/// shipping_days = 45
///
/// [[buffer_rules]]
/// category = "lunar_new_year"
/// days_before = 7
/// days_after = 7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub lead_times: LeadTimes,
    pub buffer_rules: Vec<BufferRule>,
    pub earliest_in_store_date: NaiveDate,
    /// Total holiday delay above which a warning is raised.
    pub delay_warning_threshold: u32,
    /// Extra holidays (`country,date,name[,category]`) layered over the
    /// built-in tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_file: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            lead_times: LeadTimes::default(),
            buffer_rules: BufferPolicy::default_rules(),
            earliest_in_store_date: Self::default_earliest_in_store_date(),
            delay_warning_threshold: 5,
            holiday_file: None,
        }
    }
}

impl PlannerConfig {
    fn default_earliest_in_store_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn from_toml_str(input: &str) -> PlannerResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load from a TOML file. A relative `holiday_file` is resolved against
    /// the config file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;
        if let (Some(file), Some(dir)) = (config.holiday_file.as_ref(), path.parent()) {
            if file.is_relative() {
                config.holiday_file = Some(dir.join(file));
            }
        }
        info!(path = %path.display(), "loaded planner config");
        Ok(config)
    }

    /// Config named by `TA_PLANNER_CONFIG`, or defaults when unset.
    pub fn from_env() -> PlannerResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn buffer_policy(&self) -> BufferPolicy {
        BufferPolicy::new(self.buffer_rules.iter().copied())
    }
}
