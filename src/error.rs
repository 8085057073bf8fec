//! Error types for vincenty-geodesy
//!
//! The solvers themselves never fail: a loop stopped by the iteration cap
//! returns its best estimate. These errors belong to the plumbing around the
//! engine (configuration, CSV batches and request input).

use std::fmt;
use std::io;

/// Result type for vincenty-geodesy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the numeric core
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// CSV reading or writing failed
    Csv(csv::Error),

    /// Configuration could not be parsed
    Config(String),

    /// Ellipsoid parameters are not a valid oblate spheroid
    InvalidEllipsoid(String),

    /// Caller supplied a value that cannot be used
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Csv(e) => write!(f, "CSV error: {}", e),
            Error::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidEllipsoid(msg) => write!(f, "Invalid ellipsoid: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("latitude".to_string());
        assert_eq!(err.to_string(), "Invalid input: latitude");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_json_error_becomes_config() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_invalid_ellipsoid() {
        let err = Error::InvalidEllipsoid("polar radius exceeds equatorial radius".to_string());
        assert!(err.to_string().contains("polar radius"));
    }
}
