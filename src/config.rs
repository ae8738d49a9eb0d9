use crate::domain::UnnumberedPrerelease;
use crate::error::{ChangelogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given
pub const LOCAL_CONFIG_FILE: &str = "changelog.toml";

/// File looked up in the user configuration directory as a last resort
pub const USER_CONFIG_FILE: &str = "sdk-changelog.toml";

/// Represents the complete configuration for sdk-changelog.
///
/// Contains input/output locations, changelog rendering options and cross-link settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub crosslinks: CrosslinksConfig,
}

fn default_changes_dir() -> PathBuf {
    PathBuf::from(".changes")
}

fn default_next_release_dir() -> PathBuf {
    PathBuf::from(".changes/next-release")
}

fn default_changelog_file() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

/// Where change fragments, release files and the changelog live.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    /// Directory holding one JSON document per published release
    #[serde(default = "default_changes_dir")]
    pub changes_dir: PathBuf,

    /// Directory holding one JSON fragment per unreleased entry
    #[serde(default = "default_next_release_dir")]
    pub next_release_dir: PathBuf,

    #[serde(default = "default_changelog_file")]
    pub changelog: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            changes_dir: default_changes_dir(),
            next_release_dir: default_next_release_dir(),
            changelog: default_changelog_file(),
        }
    }
}

fn default_unreleased_placeholder() -> String {
    "@AWS_JAVA_SDK_VERSION@".to_string()
}

fn default_stage() -> bool {
    true
}

/// Changelog rendering and ordering options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    /// Printed in place of the version for unreleased changes
    #[serde(default = "default_unreleased_placeholder")]
    pub unreleased_placeholder: String,

    /// Sort position of prerelease tags that are not `preview-N`
    #[serde(default)]
    pub unnumbered_prerelease: UnnumberedPrerelease,

    /// Add written files to the git index
    #[serde(default = "default_stage")]
    pub stage: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            unreleased_placeholder: default_unreleased_placeholder(),
            unnumbered_prerelease: UnnumberedPrerelease::default(),
            stage: default_stage(),
        }
    }
}

fn default_services_root() -> PathBuf {
    PathBuf::from("services")
}

fn default_template() -> PathBuf {
    PathBuf::from("scripts/doc_crosslinks/crosslink_redirect.html")
}

fn default_crosslink_output() -> PathBuf {
    PathBuf::from("docs/crosslink_redirect.html")
}

/// Documentation cross-link generation settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CrosslinksConfig {
    #[serde(default = "default_services_root")]
    pub services_root: PathBuf,

    #[serde(default = "default_template")]
    pub template: PathBuf,

    #[serde(default = "default_crosslink_output")]
    pub output: PathBuf,
}

impl Default for CrosslinksConfig {
    fn default() -> Self {
        CrosslinksConfig {
            services_root: default_services_root(),
            template: default_template(),
            output: default_crosslink_output(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog.toml` in current directory
/// 3. `sdk-changelog.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else if let Some(user_path) = dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|p| p.exists())
    {
        user_path
    } else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)
        .map_err(|e| ChangelogError::config(format!("Cannot read {}: {}", path.display(), e)))?;

    toml::from_str(&config_str)
        .map_err(|e| ChangelogError::config(format!("Invalid {}: {}", path.display(), e)))
}
