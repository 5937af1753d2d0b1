// src/error.rs
//! Error types for the Alpaca standard library

use crate::responses::ErrorCode;
use std::fmt;

pub type Result<T> = std::result::Result<T, AlpacaError>;

#[derive(Debug)]
pub enum AlpacaError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A value was well-formed but outside its permitted range
    InvalidValue(String),
    /// A value could not be read as a number
    Parse(String),
    Config(String),
    Other(String),
}

impl AlpacaError {
    /// Alpaca error number reported to clients for this error
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AlpacaError::InvalidValue(_) | AlpacaError::Parse(_) => ErrorCode::INVALID_VALUE,
            _ => ErrorCode::UNSPECIFIED,
        }
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, AlpacaError::InvalidValue(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, AlpacaError::Parse(_))
    }
}

impl fmt::Display for AlpacaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlpacaError::Io(e) => write!(f, "IO error: {}", e),
            AlpacaError::Json(e) => write!(f, "JSON error: {}", e),
            AlpacaError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            AlpacaError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AlpacaError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AlpacaError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for AlpacaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AlpacaError::Io(e) => Some(e),
            AlpacaError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AlpacaError {
    fn from(error: std::io::Error) -> Self {
        AlpacaError::Io(error)
    }
}

impl From<serde_json::Error> for AlpacaError {
    fn from(error: serde_json::Error) -> Self {
        AlpacaError::Json(error)
    }
}
