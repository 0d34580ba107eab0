//! Import planning: where the files go and what they will be called.
//!
//! Planning never writes anything. It reads the library only to decide on
//! the target folder, and talks to the operator only to identify cameras.
//! Everything it decides ends up in an [`ImportJob`], including the files it
//! had to give up on.

mod folder;
mod job;

pub use self::folder::{DATE_FORMAT, TargetFolder, build_folder_name, folder_name, list_files};
pub use self::job::{Failure, ImportJob, PlannedCopy, plan};
