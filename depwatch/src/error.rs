use std::path::PathBuf;
use thiserror::Error;

/// Problems with the files a command was asked to read
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Required file not found: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
