//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Errors raised from the naming and
//! storage crates stay attached as children.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of an import failure.
///
/// ### Fatal Errors (abort the whole import)
/// - [`ErrorKind::EventName`]
/// - [`ErrorKind::TargetFolder`]
/// - [`ErrorKind::FolderExists`]
/// - [`ErrorKind::Listing`]
/// - [`ErrorKind::CreateFolder`]
///
/// ### Per-file Errors (recorded as a [`Failure`](crate::Failure))
/// - [`ErrorKind::NonUtf8Name`]
/// - [`ErrorKind::Sequence`]
/// - [`ErrorKind::Suffix`]
/// - [`ErrorKind::CameraUnresolved`]
/// - [`ErrorKind::Prompt`]
/// - [`ErrorKind::Duplicate`]
/// - [`ErrorKind::Collision`]
/// - [`ErrorKind::Copy`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The event name cannot be turned into a folder name.
    #[display("unusable event name")]
    EventName,
    /// The dated folder name could not be built.
    #[display("cannot determine target folder")]
    TargetFolder,
    /// The target folder exists and the configured policy forbids reusing it.
    #[display("target folder already exists: {}", _0.display())]
    FolderExists(#[error(not(source))] PathBuf),
    /// The origin folder could not be listed.
    #[display("cannot list files in {}", _0.display())]
    Listing(#[error(not(source))] PathBuf),
    /// The target folder could not be created.
    #[display("cannot create target folder {}", _0.display())]
    CreateFolder(#[error(not(source))] PathBuf),
    #[display("filename is not valid UTF-8: {}", _0.display())]
    NonUtf8Name(#[error(not(source))] PathBuf),
    #[display("no 4-digit sequence number in filename {_0}")]
    Sequence(#[error(not(source))] String),
    #[display("no file extension in filename {_0}")]
    Suffix(#[error(not(source))] String),
    /// The operator did not give a valid camera identifier in time.
    #[display("no valid camera identifier for {file} after {attempts} attempt(s)")]
    CameraUnresolved { file: String, attempts: u32 },
    /// The operator could not be asked at all (closed input, broken terminal).
    #[display("cannot ask for a camera identifier for {_0}")]
    Prompt(#[error(not(source))] String),
    /// Two source files would end up with the same renamed filename.
    #[display("{file} would be renamed to {target}, already taken by {other}")]
    Duplicate { file: String, target: String, other: String },
    /// A different file already sits at the target path. Never overwritten.
    #[display("a different file already exists at {}", _0.display())]
    Collision(#[error(not(source))] PathBuf),
    /// Reading the source or writing the target failed.
    #[display("cannot copy to {}", _0.display())]
    Copy(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Copy(_) | Self::CreateFolder(_) | Self::Listing(_))
    }

    /// Returns `true` if the error aborts the whole import rather than a
    /// single file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::EventName | Self::TargetFolder | Self::FolderExists(_) | Self::Listing(_) | Self::CreateFolder(_)
        )
    }
}
