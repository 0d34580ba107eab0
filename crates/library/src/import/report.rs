use crate::plan::{Failure, TargetFolder};
use std::path::PathBuf;

/// Outcome of one [`Importer::run`](crate::Importer::run).
#[derive(Debug)]
pub struct ImportReport {
    pub(crate) dry_run: bool,
    pub(crate) folder: TargetFolder,
    pub(crate) copied: Vec<PathBuf>,
    pub(crate) already_present: Vec<PathBuf>,
    pub(crate) failures: Vec<Failure>,
}
impl ImportReport {
    /// Whether nothing was actually written.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn folder(&self) -> &TargetFolder {
        &self.folder
    }

    /// Targets written (or that would have been, in a dry run), relative to
    /// the library root.
    pub fn copied(&self) -> &[PathBuf] {
        &self.copied
    }

    /// Targets that already held identical content and were left alone.
    pub fn already_present(&self) -> &[PathBuf] {
        &self.already_present
    }

    /// Every file skipped, from planning and from copying.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} copied, {} already present, {} failed in {}.",
            self.copied.len(),
            self.already_present.len(),
            self.failures.len(),
            self.folder.path().display(),
        )
    }
}
