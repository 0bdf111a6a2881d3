use crate::error::InputError;
use crate::npm::{FETCH_TIMEOUT, NPM_REGISTRY};
use depwatch_core::DEFAULT_PACKAGE_PAGE_URL;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "depwatch.toml";

/// Packages tracked when no config names any
pub const DEFAULT_PACKAGES: &[&str] = &["java", "node-gyp"];

/// depwatch configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Package names whose latest version is tracked
    pub packages: Vec<String>,
    /// npm registry base URL
    pub registry_url: String,
    /// Base URL for package links in rendered summaries
    pub package_page_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packages: DEFAULT_PACKAGES.iter().map(|s| s.to_string()).collect(),
            registry_url: NPM_REGISTRY.to_string(),
            package_page_url: DEFAULT_PACKAGE_PAGE_URL.to_string(),
            timeout_secs: FETCH_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Load a config file that must exist
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                InputError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                InputError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        toml::from_str(&content).map_err(|source| InputError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit config, else `depwatch.toml` in `dir` if present, else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, InputError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
