use crate::github::GitHubOutput;
use crate::report::OutputTargets;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Track npm package versions and summarize updates for CI
#[derive(Parser, Debug, Clone)]
#[command(name = "depwatch")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (defaults to ./depwatch.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch the latest versions of tracked packages and update the version file
    Check {
        /// Version file to update
        #[arg(long, value_name = "PATH", default_value = "deps.json")]
        deps_file: PathBuf,

        /// Package to track (repeatable, overrides the config)
        #[arg(short, long = "package", value_name = "NAME")]
        packages: Vec<String>,

        /// npm registry base URL (overrides the config)
        #[arg(long, value_name = "URL")]
        registry_url: Option<String>,
    },

    /// Compare two version files and write a markdown summary
    Diff {
        /// Previous version file (missing means nothing was tracked)
        #[arg(long, value_name = "PATH")]
        old: PathBuf,

        /// Current version file
        #[arg(long, value_name = "PATH")]
        new: PathBuf,

        /// Markdown summary to write (empty when nothing changed)
        #[arg(long, value_name = "PATH")]
        out: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Turn a markdown summary into a pull request title and body
    Summarize {
        /// Markdown summary written by `depwatch diff`
        #[arg(value_name = "MARKDOWN")]
        markdown: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Destinations for a rendered title and body
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write the title to this file
    #[arg(long, value_name = "PATH")]
    pub title_out: Option<PathBuf>,

    /// Write the body to this file
    #[arg(long, value_name = "PATH")]
    pub body_out: Option<PathBuf>,

    /// GitHub Actions output file (defaults to $GITHUB_OUTPUT)
    #[arg(long, value_name = "PATH")]
    pub github_output: Option<PathBuf>,
}

impl OutputArgs {
    pub fn targets(&self) -> OutputTargets {
        OutputTargets {
            title_file: self.title_out.clone(),
            body_file: self.body_out.clone(),
            github_output: GitHubOutput::resolve(self.github_output.as_deref()),
        }
    }
}
