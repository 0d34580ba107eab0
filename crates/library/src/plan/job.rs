use crate::camera::{CameraResolver, Prompt};
use crate::error::{Error, ErrorKind, Result};
use crate::journal::Journal;
use crate::plan::TargetFolder;
use exn::ResultExt;
use picport_naming::{RenamedFilename, extract_sequence, extract_suffix};
use picport_storage::FileInfo;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// One source file and where it will be copied to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedCopy {
    pub source: FileInfo,
    /// Relative to the library root: `<target folder>/<renamed>`.
    pub target: PathBuf,
    pub renamed: RenamedFilename,
}

/// A source file that was skipped, and why.
#[derive(Debug)]
pub struct Failure {
    pub file: PathBuf,
    pub error: Error,
}
impl Failure {
    pub fn new(file: impl Into<PathBuf>, error: Error) -> Self {
        Self { file: file.into(), error }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error
    }
}
impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.kind())
    }
}

/// Everything an import will do, decided up front.
#[derive(Debug)]
pub struct ImportJob {
    pub(crate) origin: PathBuf,
    pub(crate) folder: TargetFolder,
    pub(crate) copies: Vec<PlannedCopy>,
    pub(crate) failures: Vec<Failure>,
}
impl ImportJob {
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn folder(&self) -> &TargetFolder {
        &self.folder
    }

    /// In the order they will be copied.
    pub fn copies(&self) -> &[PlannedCopy] {
        &self.copies
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
}

/// Works out the renamed filename of every source file.
///
/// For each file the sequence number and suffix come first, so the operator
/// is never asked about a file that couldn't be renamed anyway. A file that
/// fails any step is journaled and recorded as a [`Failure`]; the rest carry
/// on. When two files would end up with the same name, the later one fails
/// with [`ErrorKind::Duplicate`].
pub fn plan<P: Prompt>(
    origin: &Path,
    files: Vec<FileInfo>,
    folder: TargetFolder,
    resolver: &mut CameraResolver<P>,
    journal: &mut Journal,
) -> ImportJob {
    let mut copies = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    let mut taken: HashMap<String, PathBuf> = HashMap::new();

    for source in files {
        match plan_file(&source, &folder, resolver, journal, &taken) {
            Ok(copy) => {
                taken.insert(copy.renamed.to_string(), source.path.clone());
                copies.push(copy);
            },
            Err(error) => {
                journal.record(format!("Skipping {}: {}", source.path.display(), &*error));
                tracing::warn!(file = %source.path.display(), error = ?error, "Cannot plan file");
                failures.push(Failure::new(source.path, error));
            },
        }
    }
    ImportJob { origin: origin.to_path_buf(), folder, copies, failures }
}

fn plan_file<P: Prompt>(
    source: &FileInfo,
    folder: &TargetFolder,
    resolver: &mut CameraResolver<P>,
    journal: &mut Journal,
    taken: &HashMap<String, PathBuf>,
) -> Result<PlannedCopy> {
    let Some(name) = source.file_name() else {
        exn::bail!(ErrorKind::NonUtf8Name(source.path.clone()));
    };
    let sequence = extract_sequence(name).or_raise(|| ErrorKind::Sequence(name.to_string()))?;
    let suffix = extract_suffix(name).or_raise(|| ErrorKind::Suffix(name.to_string()))?;
    let camera = resolver.resolve(name, journal)?;

    let renamed = RenamedFilename::new(camera, sequence, suffix);
    let filename = renamed.to_string();
    if let Some(other) = taken.get(&filename) {
        exn::bail!(ErrorKind::Duplicate {
            file: name.to_string(),
            target: filename,
            other: other.display().to_string(),
        });
    }
    Ok(PlannedCopy {
        source: source.clone(),
        target: folder.name().join(filename),
        renamed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;
    use crate::plan::build_folder_name;
    use picport_naming::Camera;
    use picport_storage::backend::MockBackend;
    use std::collections::VecDeque;
    use std::io;
    use time::macros::date;

    struct Scripted(VecDeque<&'static str>);
    impl Prompt for Scripted {
        fn ask(&mut self, _filename: &str) -> io::Result<String> {
            self.0
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    fn plan_with(files: &[&str], answers: &[&'static str]) -> (ImportJob, Journal) {
        let origin = MockBackend::with_files(files.iter().map(|name| (*name, b"data".to_vec())));
        let library = MockBackend::default();
        let mut journal = Journal::new();
        let folder =
            build_folder_name(&library, &Context::new(date!(2024 - 01 - 15)), "Trip", &mut journal).unwrap();
        let mut resolver = CameraResolver::new(Scripted(answers.iter().copied().collect()));
        let files = crate::plan::list_files(&origin).unwrap();
        let job = plan(Path::new("/card"), files, folder, &mut resolver, &mut journal);
        (job, journal)
    }

    #[test]
    fn test_plans_every_file() {
        let (job, _) = plan_with(&["DSC_0002.NEF", "DSC_0001.JPG", "ZP0_0003.jpg"], &["f0", "s0"]);
        assert!(job.failures().is_empty());
        let targets: Vec<_> = job.copies().iter().map(|copy| copy.target.clone()).collect();
        assert_eq!(
            targets,
            vec![
                PathBuf::from("24-01-15-Trip/z3f00001.jpg"),
                PathBuf::from("24-01-15-Trip/z3s00002.nef"),
                PathBuf::from("24-01-15-Trip/z3d00003.jpg"),
            ]
        );
        assert_eq!(job.copies()[2].renamed.camera, Camera::NikonD90);
        assert_eq!(job.origin(), Path::new("/card"));
    }

    #[test]
    fn test_bad_filenames_skipped_without_prompting() {
        // Only one answer scripted: the unnamed files must not consume it.
        let (job, journal) = plan_with(&["DSC_0001.JPG", "notes.txt", "DSC_0002"], &["d0"]);
        assert_eq!(job.copies().len(), 1);
        let failed: Vec<_> = job.failures().iter().map(|failure| failure.file.clone()).collect();
        assert_eq!(failed, vec![PathBuf::from("DSC_0002"), PathBuf::from("notes.txt")]);
        assert!(matches!(job.failures()[0].kind(), ErrorKind::Suffix(name) if name == "DSC_0002"));
        assert!(matches!(job.failures()[1].kind(), ErrorKind::Sequence(name) if name == "notes.txt"));
        assert!(journal.entries().contains(&"Skipping notes.txt: no 4-digit sequence number in filename notes.txt".to_string()));
    }

    #[test]
    fn test_duplicate_renamed_filename() {
        let (job, _) = plan_with(&["ZP0_0001.JPG", "ZP0_0001.jpg"], &[]);
        assert_eq!(job.copies().len(), 1);
        assert_eq!(job.copies()[0].source.path, PathBuf::from("ZP0_0001.JPG"));
        assert!(matches!(
            job.failures()[0].kind(),
            ErrorKind::Duplicate { file, target, other }
                if file == "ZP0_0001.jpg" && target == "z3d00001.jpg" && other == "ZP0_0001.JPG"
        ));
    }

    #[test]
    fn test_folder_numbered_filenames_stay_distinct() {
        let (job, _) = plan_with(&["P1000123.JPG", "P1000124.JPG"], &["o0", "o0"]);
        assert!(job.failures().is_empty());
        let targets: Vec<_> = job.copies().iter().map(|copy| copy.target.clone()).collect();
        assert_eq!(
            targets,
            vec![PathBuf::from("24-01-15-Trip/z3o00123.jpg"), PathBuf::from("24-01-15-Trip/z3o00124.jpg")]
        );
    }

    #[test]
    fn test_unresolved_camera_is_a_failure() {
        let (job, _) = plan_with(&["DSC_0001.JPG", "ZP0_0002.JPG"], &[]);
        assert_eq!(job.copies().len(), 1);
        assert!(matches!(job.failures()[0].kind(), ErrorKind::Prompt(_)));
        assert_eq!(job.failures()[0].to_string(), "DSC_0001.JPG: cannot ask for a camera identifier for DSC_0001.JPG");
    }
}
