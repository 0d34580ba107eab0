use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::journal::Journal;
use exn::ResultExt;
use picport_config::FolderPolicy;
use picport_naming::sanitize_event_name;
use picport_storage::{FileInfo, StorageBackend, validate_path};
use std::path::{Path, PathBuf};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Date stamp at the start of every target folder, e.g. `24-01-15`.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year repr:last_two]-[month]-[day]");
/// Highest `-N` tried by [`FolderPolicy::Suffix`] before giving up.
const MAX_FOLDER_SUFFIX: u32 = 99;

/// Folder inside the library that receives one import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetFolder {
    name: PathBuf,
    path: PathBuf,
}
impl TargetFolder {
    /// Path relative to the library root, e.g. `24-01-15-Trip_2024`.
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// Absolute path, for the operator's benefit.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `<yy-mm-dd>-<event>`, for an event name that has already been sanitized.
///
/// # Errors
/// Returns [`ErrorKind::TargetFolder`] if the date can't be formatted or the
/// result isn't a single safe path component.
pub fn folder_name(today: Date, event: &str) -> Result<PathBuf> {
    let stamp = today.format(DATE_FORMAT).or_raise(|| ErrorKind::TargetFolder)?;
    let name = validate_path(format!("{stamp}-{event}")).or_raise(|| ErrorKind::TargetFolder)?;
    if name.components().count() != 1 {
        exn::bail!(ErrorKind::TargetFolder);
    }
    Ok(name)
}

/// Decides which library folder today's import of `event` goes into.
///
/// The event name is sanitized first (journaled when that changed anything).
/// If the folder already exists, `ctx.existing_folder` decides: reuse it,
/// refuse, or move on to the first free `-2`, `-3`, ... variant.
///
/// # Errors
/// - [`ErrorKind::EventName`] when the event name is empty or too long.
/// - [`ErrorKind::FolderExists`] when the policy forbids using the folder
///   (or every suffix is taken).
/// - [`ErrorKind::TargetFolder`] when the library can't be inspected.
pub fn build_folder_name(
    library: &dyn StorageBackend,
    ctx: &Context,
    event: &str,
    journal: &mut Journal,
) -> Result<TargetFolder> {
    let safe = sanitize_event_name(event).or_raise(|| ErrorKind::EventName)?;
    if safe != event {
        journal.record(format!("Replaced event name with {safe}"));
    }
    let base = folder_name(ctx.today, &safe)?;
    let exists = |name: &Path| library.exists(name).or_raise(|| ErrorKind::TargetFolder);

    let name = if !exists(base.as_path())? {
        base
    } else {
        match ctx.existing_folder {
            FolderPolicy::Reuse => {
                journal.record(format!("Target folder {} already exists, importing into it", base.display()));
                base
            },
            FolderPolicy::Fail => exn::bail!(ErrorKind::FolderExists(library.root().join(&base))),
            FolderPolicy::Suffix => {
                let mut free = None;
                for n in 2..=MAX_FOLDER_SUFFIX {
                    let candidate = PathBuf::from(format!("{}-{n}", base.display()));
                    if !exists(candidate.as_path())? {
                        free = Some(candidate);
                        break;
                    }
                }
                let Some(candidate) = free else {
                    exn::bail!(ErrorKind::FolderExists(library.root().join(&base)));
                };
                journal.record(format!(
                    "Target folder {} already exists, using {} instead",
                    base.display(),
                    candidate.display()
                ));
                candidate
            },
        }
    };
    tracing::debug!(folder = %name.display(), "Target folder decided");
    Ok(TargetFolder { path: library.root().join(&name), name })
}

/// Regular files directly inside `origin`, sorted by name.
///
/// # Errors
/// Returns [`ErrorKind::Listing`] if the origin cannot be read.
pub fn list_files(origin: &dyn StorageBackend) -> Result<Vec<FileInfo>> {
    let mut files = origin.list().or_raise(|| ErrorKind::Listing(origin.root().to_path_buf()))?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(origin = %origin.root().display(), count = files.len(), "Listed files");
    Ok(files)
}
