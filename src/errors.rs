use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Error type shared by the projection engine and the record store adapters.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),
    #[error("Invalid pay cycle `{name}`: period must be at least one day")]
    InvalidCycle { name: String },
    #[error("Date out of range: {date} shifted by {days} days")]
    DateOutOfRange { date: NaiveDate, days: i64 },
    #[error("Pay cycle not found: {0}")]
    CycleNotFound(String),
    #[error("No pay cycle selected")]
    NoCycleSelected,
    #[error("Bill not found: {0}")]
    BillNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
