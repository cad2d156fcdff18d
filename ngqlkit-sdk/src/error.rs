//! Error types for the ngqlkit SDK
//!
//! Compile errors come from the core crate unchanged; failures at the
//! executor and introspector boundaries are carried as text.

use ngqlkit::NgqlError;
use thiserror::Error;

/// Error type returned by caller-implemented boundaries
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SDK error type
#[derive(Error, Debug)]
pub enum Error {
    /// The statement could not be compiled
    #[error("Compile error: {0}")]
    Compile(#[from] NgqlError),

    /// The executor rejected or failed the statement
    #[error("Execution error: {0}")]
    Execution(String),

    /// The live schema could not be read
    #[error("Introspection error: {0}")]
    Introspection(String),

    /// A result row could not be decoded into the requested type
    #[error("Decode error: {0}")]
    Decode(String),

    /// `take` found no rows
    #[error("record not found")]
    RecordNotFound,

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl Error {
    pub fn is_record_not_found(&self) -> bool {
        matches!(self, Error::RecordNotFound)
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_conversion() {
        let err: Error = NgqlError::invalid_clause("LIMIT", "bad").into();
        assert!(matches!(err, Error::Compile(_)));
        assert_eq!(
            err.to_string(),
            "Compile error: invalid clause params in LIMIT: bad"
        );
    }

    #[test]
    fn test_json_error_is_decode() {
        let json_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Decode(_)));
        assert!(!err.is_record_not_found());
    }
}
