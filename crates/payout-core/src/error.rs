//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayoutError {
    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("METRIC/{field}: {reason} (got {value})")]
    InvalidMetric {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("PARSE/{0}")]
    ParseError(String),

    #[error("IO/{0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for PayoutError {
    fn from(err: serde_yaml::Error) -> Self {
        PayoutError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for PayoutError {
    fn from(err: serde_json::Error) -> Self {
        PayoutError::ParseError(err.to_string())
    }
}
