use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable GitHub Actions sets to the step output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Heredoc delimiter for multiline values
const DELIMITER: &str = "DELIMITER";

/// Step output file of a GitHub Actions job
#[derive(Debug, Clone)]
pub struct GitHubOutput {
    path: PathBuf,
}

impl GitHubOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the explicit path if given, otherwise `$GITHUB_OUTPUT` when set
    pub fn resolve(explicit: Option<&Path>) -> Option<Self> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(GITHUB_OUTPUT_ENV).map(PathBuf::from))
            .filter(|path| !path.as_os_str().is_empty())
            .map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `key=value` pairs using the multiline heredoc form
    pub fn append(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open output file: {}", self.path.display()))?;

        let mut block = String::new();
        for (key, value) in pairs {
            block.push_str(&format_entry(key, value));
        }

        file.write_all(block.as_bytes())
            .with_context(|| format!("Failed to write output file: {}", self.path.display()))
    }
}

fn format_entry(key: &str, value: &str) -> String {
    format!("{key}<<{DELIMITER}\n{value}\n{DELIMITER}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_entry() {
        assert_eq!(
            format_entry("title", "Dependency update: java none -> 21.0.1"),
            "title<<DELIMITER\nDependency update: java none -> 21.0.1\nDELIMITER\n"
        );
    }

    #[test]
    fn test_append_preserves_existing_outputs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        fs::write(&path, "previous=1\n").unwrap();

        let output = GitHubOutput::new(&path);
        output
            .append(&[("title", "t"), ("body", "- a: none -> 1\n- b: 1 -> 2")])
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "previous=1\ntitle<<DELIMITER\nt\nDELIMITER\nbody<<DELIMITER\n- a: none -> 1\n- b: 1 -> 2\nDELIMITER\n"
        );
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let explicit = Path::new("/tmp/explicit-output");
        let output = GitHubOutput::resolve(Some(explicit)).unwrap();
        assert_eq!(output.path(), explicit);
    }
}
