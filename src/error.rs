use chrono::NaiveDate;
use polars::prelude::PolarsError;
use std::io;
use thiserror::Error;

/// Errors raised at the planner boundary. Nothing inside the backward walk
/// itself can fail; these cover caller input and the export/config plumbing.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("unsupported country '{0}' (expected CHINA, VIETNAM, CAMBODIA or INDONESIA)")]
    InvalidCountry(String),
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("in-store date {date} is before the earliest supported date {earliest}")]
    InStoreDateTooEarly { date: NaiveDate, earliest: NaiveDate },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error(transparent)]
    HolidaySource(#[from] HolidaySourceError),
}

pub type PlannerResult<T> = Result<T, PlannerError>;

/// Failures of a holiday data source. The provider recovers from all of these
/// by treating the failed year as holiday-free, so they only surface when a
/// source is used directly.
#[derive(Debug, Error)]
pub enum HolidaySourceError {
    #[error("invalid holiday record: {0}")]
    InvalidRecord(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
