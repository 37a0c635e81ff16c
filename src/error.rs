use thiserror::Error;

use crate::field::Field;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CronError {
    #[error("Expected 5 to 7 fields, found {0}")]
    FieldCount(usize),
    #[error("{field} value {value} out of range [{min}-{max}]")]
    OutOfRange { field: Field, value: String, min: u32, max: u32 },
    #[error("Invalid {field}: {token}")]
    InvalidToken { field: Field, token: String },
    #[error("Invalid step in {field}: {step}")]
    InvalidStep { field: Field, step: String },
    #[error("Unsupported step base in {field}: {token}")]
    UnsupportedStep { field: Field, token: String },
    #[error("Day of week and day of month cannot both be unspecified")]
    BothUnspecified,
    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),
    #[error("UTC offset must be integer minutes between -1080 and +1080, got {0}")]
    InvalidOffset(i32),
    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),
    #[error("A time zone and a UTC offset cannot both be given")]
    ConflictingZone,
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CronError>;

// Helper conversions
impl From<config::ConfigError> for CronError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}

impl CronError {
    /// True for errors raised while compiling an expression or its options,
    /// as opposed to failures reading configuration.
    pub fn is_construction(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}
