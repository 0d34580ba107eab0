//! Filename parsing and composition for imported photos.
//!
//! Cameras only use four digits for their image sequence number, so two
//! cameras (or one camera across a wrap-around) will happily produce the same
//! `DSC_4321.JPG`. Imported files are renamed to a schema that keeps them
//! unique within a library:
//!
//! ```text
//! z3 | camera identifier | original 4 digits | . | lowercase suffix
//! ```
//!
//! This crate is the leaf of the workspace: pure functions that pull the
//! [`Sequence`] and [`Suffix`] out of an original filename, the fixed
//! [`Camera`] alphabet, and [`RenamedFilename`] which composes them.
//!
//! # Example
//!
//! ```
//! use picport_naming::{Camera, RenamedFilename, extract_sequence, extract_suffix};
//!
//! let sequence = extract_sequence("DSC_4321.JPG").unwrap();
//! let suffix = extract_suffix("DSC_4321.JPG").unwrap();
//! let renamed = RenamedFilename::new(Camera::NikonD90, sequence, suffix);
//! assert_eq!(renamed.to_string(), "z3d04321.jpg");
//! ```

mod codec;
mod consts;
pub mod error;
pub mod models;

pub use crate::codec::{extract_sequence, extract_suffix, sanitize_event_name, sequence_prefix};
pub use crate::consts::{FILENAME_SCHEMA, MAX_NAME_LEN, RENAMED_PREFIX};
pub use crate::models::{Camera, RenamedFilename, Sequence, Suffix};
