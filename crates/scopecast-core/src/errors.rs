//! Error types for failure handling across the estimation pipeline
//!
//! A single error hierarchy covers both engine variants and the
//! orchestrator. Categorizing failures by their source (transport, reply
//! validation, configuration) lets the orchestrator collapse them into one
//! recoverable Failed state while logs keep the specific cause.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum EstimatorError {
    #[error("Engine call failed: {0}")]
    EngineError(String),
    #[error("Invalid engine reply: {0}")]
    InvalidReply(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("No services selected")]
    EmptySelection,
    #[error("Parsing error: {0}")]
    ParsingError(String),
    #[error("I/O error: {0}")]
    IoError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for EstimatorError {
    fn from(err: std::io::Error) -> Self {
        EstimatorError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for EstimatorError {
    fn from(err: reqwest::Error) -> Self {
        EstimatorError::EngineError(err.to_string())
    }
}
