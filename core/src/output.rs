use crate::types::{ChangeEntry, Changeset};
use colored::Colorize;

/// Base URL for per-package pages linked from rendered summaries
pub const DEFAULT_PACKAGE_PAGE_URL: &str = "https://www.npmjs.com/package";

/// Heading that opens the markdown summary
pub const MARKDOWN_HEADING: &str = "### Dependency Updates";

/// Title and body for a pull request or issue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleBody {
    pub title: String,
    pub body: String,
}

impl TitleBody {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }
}

/// Renders a changeset into the text artifacts consumed by CI
#[derive(Debug, Clone)]
pub struct SummaryRenderer {
    package_page_url: String,
}

impl SummaryRenderer {
    pub fn new(package_page_url: &str) -> Self {
        Self {
            package_page_url: package_page_url.trim_end_matches('/').to_string(),
        }
    }

    /// Link to the registry page of a package
    pub fn package_url(&self, name: &str) -> String {
        format!("{}/{name}", self.package_page_url)
    }

    /// Render the markdown summary document.
    ///
    /// An empty changeset renders as an empty string, which downstream
    /// steps read as "no updates".
    pub fn render_markdown(&self, changes: &Changeset) -> String {
        if changes.is_empty() {
            return String::new();
        }

        let mut out = format!("{MARKDOWN_HEADING}\n\n");
        for entry in changes {
            out.push_str(&format!(
                "- **{}**: {} -> {}\n",
                entry.name,
                entry.from_display(),
                entry.to
            ));
            out.push_str(&format!("  - {}\n", self.package_url(&entry.name)));
        }
        out
    }

    /// Render a title and plain-text body
    pub fn render_title_body(&self, changes: &Changeset) -> TitleBody {
        let title = match changes.entries() {
            [] => String::new(),
            [single] => format!("Dependency update: {single}"),
            many => {
                let summary: Vec<String> = many.iter().map(ChangeEntry::to_string).collect();
                format!("Dependency updates: {}", summary.join(", "))
            }
        };

        let body = changes
            .iter()
            .map(|entry| {
                format!(
                    "- {}: {} -> {} ({})",
                    entry.name,
                    entry.from_display(),
                    entry.to,
                    self.package_url(&entry.name)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        TitleBody { title, body }
    }
}

impl Default for SummaryRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_PAGE_URL)
    }
}

/// Renders a changeset as an aligned table on stdout
pub struct ConsoleRenderer {
    show_colors: bool,
}

impl ConsoleRenderer {
    pub fn new(show_colors: bool) -> Self {
        Self { show_colors }
    }

    pub fn render(&self, changes: &Changeset) {
        print!("{}", self.render_to_string(changes));
    }

    pub fn render_to_string(&self, changes: &Changeset) -> String {
        if changes.is_empty() {
            return "All tracked packages are up to date!\n".to_string();
        }

        let max_name = changes.iter().map(|c| c.name.len()).max().unwrap_or(0);
        let max_from = changes
            .iter()
            .map(|c| c.from_display().len())
            .max()
            .unwrap_or(0);

        let mut out = String::from("Updated packages:\n\n");
        for entry in changes {
            out.push_str(&self.format_row(entry, max_name, max_from));
            out.push('\n');
        }
        out
    }

    fn format_row(&self, entry: &ChangeEntry, name_width: usize, from_width: usize) -> String {
        let row = format!(
            "  {:<name_width$}  {:>from_width$} → {}",
            entry.name,
            entry.from_display(),
            self.format_version(&entry.to, entry.from.is_none()),
        );
        row.trim_end().to_string()
    }

    /// Newly tracked packages are highlighted differently from bumps
    fn format_version(&self, version: &str, is_new: bool) -> String {
        if !self.show_colors {
            return version.to_string();
        }
        if is_new {
            version.cyan().to_string()
        } else {
            version.green().to_string()
        }
    }
}
