//! Photo import planning and execution.
//!
//! An import is one linear pipeline:
//!
//! ```text
//! list files -> resolve each file -> compose names -> copy (or simulate) -> report
//! ```
//!
//! [`Importer`] is the entry point. Every step records what it does in a
//! [`Journal`] so the operator gets a complete audit trail, dry run or not.
//! A file that cannot be renamed or copied is recorded as a [`Failure`] and
//! the rest of the batch carries on; only problems that make the whole
//! import meaningless (an unusable event name, an unreadable origin folder,
//! an uncreatable target folder) abort it.

pub mod camera;
pub mod error;
pub mod import;
mod journal;
pub mod plan;

pub use crate::camera::{CameraResolver, Prompt, Terminal};
pub use crate::import::{ImportReport, Importer};
pub use crate::journal::Journal;
pub use crate::plan::{Failure, ImportJob, PlannedCopy, TargetFolder};
use picport_config::FolderPolicy;
use time::Date;

/// Per-run settings shared by every step of an import.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
    /// Date stamped onto the target folder, fixed when the run starts.
    pub today: Date,
    /// Log every intended action, write nothing.
    pub dry_run: bool,
    pub existing_folder: FolderPolicy,
}
impl Context {
    pub fn new(today: Date) -> Self {
        Self {
            today,
            dry_run: false,
            existing_folder: FolderPolicy::default(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_existing_folder(mut self, policy: FolderPolicy) -> Self {
        self.existing_folder = policy;
        self
    }
}
