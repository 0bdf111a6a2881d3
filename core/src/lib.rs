pub mod diff;
pub mod output;
pub mod parse;
pub mod types;

// Re-export commonly used types at crate root
pub use diff::diff;
pub use output::{ConsoleRenderer, DEFAULT_PACKAGE_PAGE_URL, SummaryRenderer, TitleBody};
pub use parse::parse_markdown;
pub use types::{ChangeEntry, Changeset, VersionMap};
