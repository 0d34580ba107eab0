use clap::{ArgAction, Parser};
use picport_config::{Config, error::Result, expand_home};
use picport_naming::FILENAME_SCHEMA;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "picport",
    version,
    about = "Import pictures (e.g. from an SD card) into a new folder of the photo library",
    after_long_help = FILENAME_SCHEMA
)]
pub struct Cli {
    /// Short, descriptive name for the target subfolder
    pub event_name: String,
    /// Folder containing the files to import
    #[arg(default_value = ".")]
    pub file: PathBuf,
    /// Copy nothing, only show what would be done
    #[arg(short = 'n', long)]
    pub dry_run: bool,
    #[arg(
        short = 't',
        value_name = "TARGET_DIR",
        help = "Library directory, a subfolder is created in here for the renamed pictures [default: ~/Pictures/original/]"
    )]
    pub target_dir: Option<PathBuf>,
    /// Configuration file to use instead of the default one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Ask only once per filename prefix which camera took the pictures
    #[arg(long)]
    pub remember_cameras: bool,
    /// More logging on stderr (-v, -vv, -vvv), unless RUST_LOG is set
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
impl Cli {
    /// Command-line flags win over every configured value.
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(target) = &self.target_dir {
            config.library = expand_home(target)?;
        }
        if self.remember_cameras {
            config.remember_cameras = true;
        }
        Ok(())
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;
    use std::path::Path;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["picport", "Trip 2024"]).unwrap();
        assert_eq!(cli.event_name, "Trip 2024");
        assert_eq!(cli.file, PathBuf::from("."));
        assert!(!cli.dry_run);
        assert_eq!(cli.target_dir, None);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "picport",
            "-n",
            "-t",
            "/srv/photos",
            "--remember-cameras",
            "-vv",
            "Trip",
            "/media/card",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.file, PathBuf::from("/media/card"));
        assert_eq!(cli.log_level(), "debug");

        let mut config = Config::default();
        cli.apply(&mut config).unwrap();
        assert_eq!(config.library, Path::new("/srv/photos"));
        assert!(config.remember_cameras);
    }

    #[test]
    fn test_flags_leave_config_alone_when_absent() {
        let cli = Cli::try_parse_from(["picport", "Trip"]).unwrap();
        let mut config = Config { remember_cameras: true, ..Config::default() };
        cli.apply(&mut config).unwrap();
        assert_eq!(config, Config { remember_cameras: true, ..Config::default() });
    }

    #[rstest]
    #[case(&["picport"])]
    #[case(&["picport", "Trip", "/media/card", "extra"])]
    #[case(&["picport", "-t"])]
    fn test_invalid_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_help_explains_filename_schema() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("z3d04321.jpg"));
        assert!(help.contains("[default: ~/Pictures/original/]"));
    }
}
