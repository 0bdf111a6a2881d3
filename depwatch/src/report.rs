//! Rendering changesets to files and the CI output channel

use crate::error::InputError;
use crate::github::GitHubOutput;
use crate::store;
use anyhow::{Context, Result};
use depwatch_core::{Changeset, SummaryRenderer, TitleBody, VersionMap, diff, parse_markdown};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Compare two version map files.
///
/// The old map is optional: a missing or unreadable file is an empty
/// baseline. The new map is required.
pub fn diff_files(old: &Path, new: &Path) -> Result<Changeset, InputError> {
    let current = store::load_required(new)?;

    let previous = match store::load(old) {
        Ok(Some(map)) => map,
        Ok(None) => {
            debug!("{} not found, using empty baseline", old.display());
            VersionMap::new()
        }
        Err(e) => {
            warn!("{e}; using empty baseline");
            VersionMap::new()
        }
    };

    Ok(diff(&previous, &current))
}

/// Read back a rendered markdown summary; a missing file means no updates
pub fn read_summary(path: &Path) -> Result<Changeset, InputError> {
    match store::read_optional(path)? {
        Some(content) => Ok(parse_markdown(&content)),
        None => {
            debug!("{} not found, no updates to summarize", path.display());
            Ok(Changeset::default())
        }
    }
}

/// Write the markdown summary, leaving an empty file when nothing changed
pub fn write_markdown(path: &Path, renderer: &SummaryRenderer, changes: &Changeset) -> Result<()> {
    fs::write(path, renderer.render_markdown(changes))
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Where a rendered title and body are delivered
#[derive(Debug, Clone, Default)]
pub struct OutputTargets {
    pub title_file: Option<PathBuf>,
    pub body_file: Option<PathBuf>,
    pub github_output: Option<GitHubOutput>,
}

impl OutputTargets {
    /// No destination configured at all
    pub fn is_empty(&self) -> bool {
        self.title_file.is_none() && self.body_file.is_none() && self.github_output.is_none()
    }

    /// Deliver the title and body to every configured destination.
    ///
    /// Title and body files are always written. The CI output channel only
    /// receives values when there is something to report.
    pub fn deliver(&self, rendered: &TitleBody) -> Result<()> {
        if let Some(path) = &self.title_file {
            fs::write(path, &rendered.title)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }

        if let Some(path) = &self.body_file {
            fs::write(path, &rendered.body)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }

        if let Some(output) = &self.github_output {
            if rendered.is_empty() {
                debug!("No updates, skipping {}", output.path().display());
            } else {
                output.append(&[
                    ("title", rendered.title.as_str()),
                    ("body", rendered.body.as_str()),
                ])?;
                info!("Wrote title and body to {}", output.path().display());
            }
        }

        Ok(())
    }
}
