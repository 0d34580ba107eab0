//! `picport` imports pictures from a memory card into a dated event folder
//! of the photo library, renaming every file along the way.
//!
//! Exit codes: `0` when every file was imported, `1` when some files had to
//! be skipped, `2` when the import could not start at all.

mod cli;

use crate::cli::Cli;
use clap::Parser;
use derive_more::{Display, Error};
use exn::ResultExt;
use picport_config::Config;
use picport_library::{CameraResolver, Context, ImportReport, Importer, Journal, Terminal};
use picport_storage::backend::LocalBackend;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

const EXIT_PARTIAL: u8 = 1;
const EXIT_FATAL: u8 = 2;

#[derive(Debug, Display, Error)]
enum ErrorKind {
    #[display("cannot load configuration")]
    Config,
    #[display("cannot read origin folder {}", _0.display())]
    Origin(#[error(not(source))] PathBuf),
    #[display("cannot use library folder {}", _0.display())]
    Library(#[error(not(source))] PathBuf),
    #[display("import aborted")]
    Import,
}

fn main() -> ExitCode {
    // Local offset lookup is only reliable while the process is single-threaded.
    let today = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()).date();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    match run(&cli, today) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            eprintln!("{} file(s) were not imported:", report.failures().len());
            for failure in report.failures() {
                eprintln!("  {failure}");
                tracing::debug!(file = %failure.file.display(), error = ?failure.error, "Failure");
            }
            ExitCode::from(EXIT_PARTIAL)
        },
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::from(EXIT_FATAL)
        },
    }
}

fn run(cli: &Cli, today: Date) -> Result<ImportReport, exn::Exn<ErrorKind>> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    cli.apply(&mut config).or_raise(|| ErrorKind::Config)?;

    // Both folders are validated before anything is asked or written.
    let library = LocalBackend::open("library", &config.library).or_raise(|| ErrorKind::Library(config.library.clone()))?;
    let origin = LocalBackend::open("origin", &cli.file).or_raise(|| ErrorKind::Origin(cli.file.clone()))?;

    let ctx = Context::new(today)
        .with_dry_run(cli.dry_run)
        .with_existing_folder(config.existing_folder);
    let importer = Importer::new(Arc::new(origin), Arc::new(library), ctx);
    let mut resolver = CameraResolver::from_config(Terminal::stdio(), &config);
    let mut journal = Journal::echo_to(io::stdout());

    importer
        .import(&cli.event_name, &mut resolver, &mut journal)
        .or_raise(|| ErrorKind::Import)
}
