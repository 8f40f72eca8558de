use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Insufficient history: {available} actual period(s) available, at least 2 required for growth-slope derivation")]
    InsufficientHistory { available: usize },

    #[error("Unknown modification target: category '{category}', item '{item}'")]
    TargetNotFound { category: String, item: String },

    #[error("Parameter value {value} is outside the declared range [{min}, {max}]")]
    InvalidParameterRange { value: f64, min: f64, max: f64 },

    #[error("No modification with id {0} in the active scenario")]
    UnknownModification(uuid::Uuid),

    #[error("Actuals series is not contiguous: expected month ending {expected}, found {found}")]
    NonContiguousSeries {
        expected: NaiveDate,
        found: NaiveDate,
    },

    #[error("Actuals series is empty")]
    EmptySeries,

    #[error("Statement for {date} violates an arithmetic invariant: {details}")]
    InconsistentStatement { date: NaiveDate, details: String },

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "resolver-client")]
    #[error("Resolver HTTP error: {0}")]
    ResolverHttp(#[from] reqwest::Error),

    #[cfg(feature = "resolver-client")]
    #[error("Resolver returned an unusable response: {0}")]
    ResolverResponse(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
