//! Naming Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A naming error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for naming operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The filename has no run of four digits close enough to its start.
    #[display("no 4-digit sequence number found in filename: {_0}")]
    SequenceNotFound(#[error(not(source))] String),
    /// The filename has no extension, so the renamed file would have none either.
    #[display("no file extension found in filename: {_0}")]
    MissingSuffix(#[error(not(source))] String),
    /// Event names must contain at least one character.
    #[display("event name is empty")]
    EmptyEventName,
    /// Event names are used as folder names and must stay short.
    #[display("event name is {_0} characters long, must be shorter than {}", crate::MAX_NAME_LEN)]
    EventNameTooLong(#[error(not(source))] usize),
    /// Not one of the fixed camera identifiers.
    #[display("invalid camera identifier: {_0:?}")]
    InvalidCamera(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Asking the operator again is the only retry that makes sense, and
        // only for their own input.
        matches!(self, Self::InvalidCamera(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::SequenceNotFound("IMG.JPG".to_string()).to_string(),
            "no 4-digit sequence number found in filename: IMG.JPG"
        );
        assert_eq!(
            ErrorKind::EventNameTooLong(250).to_string(),
            "event name is 250 characters long, must be shorter than 200"
        );
        assert_eq!(ErrorKind::InvalidCamera("x1".to_string()).to_string(), "invalid camera identifier: \"x1\"");
    }

    #[test]
    fn error_kind_retryable() {
        assert!(ErrorKind::InvalidCamera(String::new()).is_retryable());
        assert!(!ErrorKind::EmptyEventName.is_retryable());
        assert!(!ErrorKind::MissingSuffix("DSC_0001".to_string()).is_retryable());
    }
}
