//! Configuration loading for picport.
//!
//! Values are layered with [figment], later sources winning:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. A TOML file: the one passed explicitly, or `config.toml` in the
//!    platform configuration directory (skipped silently when absent).
//! 3. Environment variables prefixed with `PICPORT_`, e.g.
//!    `PICPORT_LIBRARY=/mnt/photos` or `PICPORT_PROMPT_ATTEMPTS=3`.
//!
//! ```toml
//! library = "~/Pictures/original/"
//! prompt_attempts = 5
//! remember_cameras = false
//! existing_folder = "reuse"
//!
//! [[cameras]]
//! prefix = "ZP0_"
//! camera = "d0"
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use picport_naming::Camera;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Library directory used when nothing else is configured.
pub const DEFAULT_LIBRARY: &str = "~/Pictures/original/";
/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "PICPORT_";
/// Keys read from the environment; other `PICPORT_*` variables are ignored.
const ENV_KEYS: [&str; 5] = ["library", "prompt_attempts", "remember_cameras", "existing_folder", "cameras"];

/// What to do when today's target folder already exists in the library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderPolicy {
    /// Import into the existing folder. Individual file collisions are still
    /// reported.
    #[default]
    Reuse,
    /// Refuse to import.
    Fail,
    /// Pick the first free `<folder>-2`, `<folder>-3`, ...
    Suffix,
}

/// Filenames starting with `prefix` were taken by `camera`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraPrefix {
    pub prefix: String,
    pub camera: Camera,
}
impl CameraPrefix {
    pub fn new(prefix: impl Into<String>, camera: Camera) -> Self {
        Self { prefix: prefix.into(), camera }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Photo library root. Each import creates a subfolder in here.
    pub library: PathBuf,
    /// How many times the operator is asked for a camera identifier before
    /// the file is given up on. Never less than one.
    pub prompt_attempts: u32,
    /// Reuse the operator's answer for every file sharing the same prefix
    /// (the text before the sequence number) within one import.
    pub remember_cameras: bool,
    pub existing_folder: FolderPolicy,
    /// Cameras recognised from the filename alone, checked in order.
    pub cameras: Vec<CameraPrefix>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            library: PathBuf::from(DEFAULT_LIBRARY),
            prompt_attempts: 5,
            remember_cameras: false,
            existing_folder: FolderPolicy::default(),
            cameras: vec![CameraPrefix::new("ZP0_", Camera::NikonD90)],
        }
    }
}
impl Config {
    /// Load configuration from defaults, the TOML file and the environment.
    ///
    /// # Errors
    /// - [`ErrorKind::MissingFile`] when `file` is given but does not exist.
    /// - [`ErrorKind::Invalid`] when any source holds an unusable value.
    /// - [`ErrorKind::HomeDirectory`] when `library` starts with `~` and
    ///   there is no home directory.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let figment = Self::figment(file)?;
        let mut config: Self = figment.extract().map_err(|e| ErrorKind::Invalid(e.to_string()))?;
        config.library = expand_home(&config.library)?;
        config.prompt_attempts = config.prompt_attempts.max(1);
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// The layered sources, before extraction.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        match file {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::MissingFile(path.to_path_buf()));
                }
                figment = figment.merge(Toml::file(path));
            },
            None => {
                if let Some(path) = Self::default_path() {
                    tracing::trace!(path = %path.display(), "Looking for configuration file");
                    figment = figment.merge(Toml::file(path));
                }
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS)))
    }

    /// `config.toml` inside the platform configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "picport").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Expand a leading `~` component to the current user's home directory.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let Some(dirs) = BaseDirs::new() else {
                exn::bail!(ErrorKind::HomeDirectory);
            };
            Ok(dirs.home_dir().join(rest))
        },
        Err(_) => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use std::ops::Deref;

    fn config_file(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.library, PathBuf::from("~/Pictures/original/"));
        assert_eq!(config.prompt_attempts, 5);
        assert!(!config.remember_cameras);
        assert_eq!(config.existing_folder, FolderPolicy::Reuse);
        assert_eq!(config.cameras, vec![CameraPrefix::new("ZP0_", Camera::NikonD90)]);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let (_dir, path) = config_file(
            r#"
            library = "/srv/photos"
            prompt_attempts = 2
            remember_cameras = true
            existing_folder = "suffix"

            [[cameras]]
            prefix = "DSC_"
            camera = "f0"
            "#,
        );
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.library, PathBuf::from("/srv/photos"));
        assert_eq!(config.prompt_attempts, 2);
        assert!(config.remember_cameras);
        assert_eq!(config.existing_folder, FolderPolicy::Suffix);
        assert_eq!(config.cameras, vec![CameraPrefix::new("DSC_", Camera::NikonD600)]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (_dir, path) = config_file("library = \"/srv/photos\"\n");
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.prompt_attempts, 5);
        assert_eq!(config.cameras.len(), 1);
    }

    #[test]
    fn test_prompt_attempts_at_least_one() {
        let (_dir, path) = config_file("library = \"/srv/photos\"\nprompt_attempts = 0\n");
        assert_eq!(Config::load(Some(&path)).unwrap().prompt_attempts, 1);
    }

    #[rstest]
    #[case("existing_folder = \"sometimes\"\n")]
    #[case("[[cameras]]\nprefix = \"DSC_\"\ncamera = \"x9\"\n")]
    #[case("prompt_attempts = -1\n")]
    #[case("unknown_key = true\n")]
    fn test_invalid_values(#[case] contents: &str) {
        let (_dir, path) = config_file(contents);
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err.deref(), ErrorKind::Invalid(_)));
    }

    #[test]
    fn test_environment_overrides_and_unrelated_variables() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "library = \"/srv/photos\"\nprompt_attempts = 2\n")?;
            // Only variables no other test depends on: the environment is process-wide.
            jail.set_env("PICPORT_REMEMBER_CAMERAS", "true");
            jail.set_env("PICPORT_DEBUG", "1");
            let config = Config::load(Some(&jail.directory().join("config.toml"))).unwrap();
            assert_eq!(config.library, PathBuf::from("/srv/photos"));
            assert_eq!(config.prompt_attempts, 2);
            assert!(config.remember_cameras);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err.deref(), ErrorKind::MissingFile(p) if p == &path));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(Path::new("/absolute/path")).unwrap(), PathBuf::from("/absolute/path"));
        assert_eq!(expand_home(Path::new("relative/~")).unwrap(), PathBuf::from("relative/~"));
        if let Some(dirs) = BaseDirs::new() {
            assert_eq!(expand_home(Path::new("~/Pictures/original/")).unwrap(), dirs.home_dir().join("Pictures/original"));
        }
    }
}
