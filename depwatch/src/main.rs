use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use depwatch::check::check_packages;
use depwatch::cli::{Args, Command, OutputArgs};
use depwatch::config::Config;
use depwatch::npm::NpmClient;
use depwatch::{report, store};
use depwatch_core::{ConsoleRenderer, SummaryRenderer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::discover(args.config.as_deref(), Path::new("."))?;

    match args.command {
        Command::Check {
            deps_file,
            packages,
            registry_url,
        } => run_check(config, &deps_file, packages, registry_url).await,
        Command::Diff {
            old,
            new,
            out,
            output,
        } => run_diff(&config, &old, &new, &out, &output),
        Command::Summarize { markdown, output } => run_summarize(&config, &markdown, &output),
    }
}

/// Diagnostics go to stderr so stdout only carries command results
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_check(
    mut config: Config,
    deps_file: &Path,
    packages: Vec<String>,
    registry_url: Option<String>,
) -> Result<()> {
    if !packages.is_empty() {
        config.packages = packages;
    }
    if let Some(url) = registry_url {
        config.registry_url = url;
    }

    // A corrupt version file must not be silently replaced
    let stored = store::load(deps_file)?;
    let file_exists = stored.is_some();
    let stored = stored.unwrap_or_default();

    let client = NpmClient::new(&config.registry_url, config.timeout());

    let progress = ProgressBar::new(config.packages.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let outcome = check_packages(&client, &config.packages, &stored, |done, _total| {
        progress.set_position(done as u64);
    })
    .await;
    progress.finish_and_clear();

    if !outcome.failures.is_empty() {
        warn!(
            "{} package(s) could not be fetched: {}",
            outcome.failures.len(),
            outcome.failed_names().collect::<Vec<_>>().join(", ")
        );
    }

    if !outcome.needs_write(file_exists) {
        info!("No dependency updates found.");
        ConsoleRenderer::new(true).render(&outcome.changes);
        return Ok(());
    }

    store::write(deps_file, &outcome.updated)?;

    if outcome.changes.is_empty() {
        info!("Initialized {}", deps_file.display());
    } else {
        info!("Updated: {}", outcome.summary());
    }

    ConsoleRenderer::new(true).render(&outcome.changes);
    Ok(())
}

fn run_diff(config: &Config, old: &Path, new: &Path, out: &Path, output: &OutputArgs) -> Result<()> {
    // Both inputs are loaded before anything is written
    let changes = report::diff_files(old, new)?;
    let renderer = SummaryRenderer::new(&config.package_page_url);

    report::write_markdown(out, &renderer, &changes)?;
    if changes.is_empty() {
        info!("No dependency updates found.");
    } else {
        info!("{} update(s) written to {}", changes.len(), out.display());
    }

    output.targets().deliver(&renderer.render_title_body(&changes))
}

fn run_summarize(config: &Config, markdown: &Path, output: &OutputArgs) -> Result<()> {
    let changes = report::read_summary(markdown)?;
    let renderer = SummaryRenderer::new(&config.package_page_url);
    let rendered = renderer.render_title_body(&changes);

    let targets = output.targets();
    if targets.is_empty() {
        if !rendered.is_empty() {
            println!("{}\n\n{}", rendered.title, rendered.body);
        }
        return Ok(());
    }

    targets.deliver(&rendered)
}
