//! Import execution.
//!
//! The [`Importer`] ties the pipeline together: it announces the run, lists
//! the origin, plans every file and finally copies them into the library.
//! A dry run swaps the library for a
//! [`ReadOnlyBackend`](picport_storage::backend::ReadOnlyBackend): every check
//! and every journal line is the same, only the writes are dropped.

mod report;

pub use self::report::ImportReport;
use crate::camera::{CameraResolver, Prompt};
use crate::error::{ErrorKind, Result};
use crate::journal::Journal;
use crate::plan::{self, Failure, ImportJob, PlannedCopy, TargetFolder};
use crate::Context;
use exn::ResultExt;
use picport_storage::backend::ReadOnlyBackend;
use picport_storage::error::ErrorKind as StorageErrorKind;
use picport_storage::{BackendHandle, FileInfo};
use std::ops::Deref;
use std::sync::Arc;

const BANNER_REPEAT: usize = 10;

enum Outcome {
    Copied,
    AlreadyPresent,
}

/// Imports files from an origin folder into a dated event folder of the
/// library.
pub struct Importer {
    origin: BackendHandle,
    library: BackendHandle,
    ctx: Context,
}
impl Importer {
    pub fn new(origin: BackendHandle, library: BackendHandle, ctx: Context) -> Self {
        let library: BackendHandle = if ctx.dry_run { Arc::new(ReadOnlyBackend::new(library)) } else { library };
        Self { origin, library, ctx }
    }

    /// Banner telling the operator whether this run is for real.
    pub fn announce(&self, event: &str, journal: &mut Journal) {
        let banner = if self.ctx.dry_run { "dry-run " } else { "real!   " };
        journal.record(banner.repeat(BANNER_REPEAT));
        journal.record(format!("Event name = {event} target={}", self.library.root().display()));
    }

    pub fn target_folder(&self, event: &str, journal: &mut Journal) -> Result<TargetFolder> {
        plan::build_folder_name(&*self.library, &self.ctx, event, journal)
    }

    pub fn list_files(&self) -> Result<Vec<FileInfo>> {
        plan::list_files(&*self.origin)
    }

    pub fn plan<P: Prompt>(
        &self,
        files: Vec<FileInfo>,
        folder: TargetFolder,
        resolver: &mut CameraResolver<P>,
        journal: &mut Journal,
    ) -> ImportJob {
        plan::plan(self.origin.root(), files, folder, resolver, journal)
    }

    /// Runs the whole pipeline for `event` and journals a final summary.
    ///
    /// # Errors
    /// Only for problems that make the whole import pointless, see
    /// [`ErrorKind::is_fatal`]. Anything that goes wrong with a single file
    /// ends up in [`ImportReport::failures`].
    #[tracing::instrument(level = "debug", skip_all, fields(event = event, dry_run = self.ctx.dry_run))]
    pub fn import<P: Prompt>(
        &self,
        event: &str,
        resolver: &mut CameraResolver<P>,
        journal: &mut Journal,
    ) -> Result<ImportReport> {
        self.announce(event, journal);
        let folder = self.target_folder(event, journal)?;
        let files = self.list_files()?;
        let job = self.plan(files, folder, resolver, journal);
        let report = self.run(job, journal)?;
        journal.record(report.summary());
        Ok(report)
    }

    /// Creates the target folder and copies every planned file, in order.
    ///
    /// Nothing already in the library is ever overwritten: a target holding
    /// the same content is skipped as already present, a target holding
    /// anything else is a [`ErrorKind::Collision`].
    ///
    /// # Errors
    /// Returns [`ErrorKind::CreateFolder`] if the target folder can't be
    /// created. Per-file problems are collected in the report instead.
    pub fn run(&self, job: ImportJob, journal: &mut Journal) -> Result<ImportReport> {
        let ImportJob { origin, folder, copies, mut failures } = job;
        journal.record(format!(
            "Copy {} files from {} to {}.",
            copies.len(),
            origin.display(),
            folder.path().display()
        ));
        self.library
            .create_dir(folder.name())
            .or_raise(|| ErrorKind::CreateFolder(folder.path().to_path_buf()))?;

        let mut copied = Vec::with_capacity(copies.len());
        let mut already_present = Vec::new();
        for copy in copies {
            let absolute = self.library.root().join(&copy.target);
            journal.record(format!("Copy {} to {}", copy.source.path.display(), absolute.display()));
            match self.copy_file(&copy) {
                Ok(Outcome::Copied) => copied.push(copy.target),
                Ok(Outcome::AlreadyPresent) => {
                    journal.record(format!("{} already present, skipped", absolute.display()));
                    already_present.push(copy.target);
                },
                Err(error) => {
                    journal.record(format!("Failed {}: {}", copy.source.path.display(), &*error));
                    tracing::error!(file = %copy.source.path.display(), error = ?error, "Copy failed");
                    failures.push(Failure::new(copy.source.path, error));
                },
            }
        }
        Ok(ImportReport {
            dry_run: self.ctx.dry_run,
            folder,
            copied,
            already_present,
            failures,
        })
    }

    fn copy_file(&self, copy: &PlannedCopy) -> Result<Outcome> {
        let absolute = self.library.root().join(&copy.target);
        let failed = || ErrorKind::Copy(absolute.clone());

        if self.library.exists(&copy.target).or_raise(failed)? {
            let existing = self.library.hash(&copy.target).or_raise(failed)?;
            let incoming = self.origin.hash(&copy.source.path).or_raise(failed)?;
            if existing == incoming {
                tracing::info!(path = %absolute.display(), "Identical file already in library");
                return Ok(Outcome::AlreadyPresent);
            }
            exn::bail!(ErrorKind::Collision(absolute));
        }

        let mut reader = self.origin.reader(&copy.source.path).or_raise(failed)?;
        match self.library.write_new(&copy.target, &mut reader, Some(copy.source.modified)) {
            Ok(bytes) => {
                tracing::info!(source = %copy.source.path.display(), path = %absolute.display(), bytes, "Copied");
                Ok(Outcome::Copied)
            },
            // Someone else got there between the check and the write.
            Err(e) if matches!(e.deref(), StorageErrorKind::AlreadyExists(_)) => {
                Err(e).or_raise(|| ErrorKind::Collision(absolute.clone()))
            },
            Err(e) => Err(e).or_raise(failed),
        }
    }
}
