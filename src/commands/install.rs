//! Install command - drive the orchestrator and report the outcome.

use std::path::PathBuf;

use anyhow::Result;
use log::debug;

use crate::config::Config;
use crate::github::GitHubRepo;
use crate::install::fetcher::CommandFetcher;
use crate::install::Orchestrator;
use crate::process::Launcher;
use crate::runtime::Runtime;

/// Install or update every pending skill.
///
/// Exits zero with a "nothing to do" note when the catalog is current,
/// zero with a per-skill success listing otherwise, and non-zero with
/// every failing skill's captured output enumerated on stderr - never a
/// silent partial success.
#[tracing::instrument(skip(runtime, launcher, config))]
#[allow(clippy::too_many_arguments)]
pub async fn install<R: Runtime, L: Launcher>(
    runtime: &R,
    launcher: &L,
    config: &Config,
    repo: &GitHubRepo,
    path: &str,
    reference: &str,
    install_root: PathBuf,
    replace: bool,
    fetch_program: String,
) -> Result<()> {
    debug!("Installing pending skills from {} under {}", repo, path);

    let fetcher = CommandFetcher::new(launcher, fetch_program);
    let orchestrator = Orchestrator::new(
        runtime,
        &config.contents,
        &fetcher,
        launcher,
        repo,
        path,
        reference,
        install_root,
    );
    let report = orchestrator.run(replace).await?;

    if report.nothing_to_do() {
        println!("All skills are already at the latest version.");
        return Ok(());
    }

    if !report.fetch_output.is_empty() {
        println!("{}", report.fetch_output);
    }

    for result in &report.results {
        if result.success {
            println!("[{}] {}", result.name, result.detail);
        }
    }

    if !report.is_success() {
        eprintln!("Install scripts failed:");
        for failure in report.failures() {
            eprintln!("[{}] {}", failure.name, failure.detail);
        }
        anyhow::bail!(
            "{} of {} skill(s) failed to install",
            report.failures().count(),
            report.results.len()
        );
    }

    println!("All {} skill(s) installed successfully.", report.results.len());
    Ok(())
}
