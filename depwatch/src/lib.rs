pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod npm;
pub mod report;
pub mod store;

pub use depwatch_core::{
    ChangeEntry, Changeset, ConsoleRenderer, SummaryRenderer, TitleBody, VersionMap, diff,
    parse_markdown,
};
