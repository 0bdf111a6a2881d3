#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a temporary working directory
pub struct TempProject {
    pub dir: TempDir,
}

impl TempProject {
    /// Create a new temporary project
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        Self { dir }
    }

    /// Get the path to the project directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file in the project with the given content
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let file_path = self.dir.path().join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Get the absolute path to a file in the project
    pub fn file_path(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    /// Read a file from the project
    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.file_path(relative_path)).expect("Failed to read file")
    }

    /// A `depwatch` command running inside the project
    pub fn depwatch(&self) -> Command {
        depwatch_in(self.path())
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A `depwatch` command running in `dir`, isolated from the caller's CI
/// environment
pub fn depwatch_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("depwatch").expect("depwatch binary");
    cmd.current_dir(dir)
        .env_remove("GITHUB_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Version file before an update run
pub fn sample_old_deps() -> &'static str {
    r#"{
  "java": "21.0.1",
  "node-gyp": "10.0.0"
}
"#
}

/// Version file after an update run
pub fn sample_new_deps() -> &'static str {
    r#"{
  "java": "21.0.1",
  "node-gyp": "11.0.0",
  "typescript": "5.9.3"
}
"#
}
