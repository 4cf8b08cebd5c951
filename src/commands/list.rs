//! List command - classify every remote skill and render the result.

use std::path::PathBuf;

use anyhow::Result;
use log::debug;

use crate::catalog::{DiffEngine, ItemStatus, Status};
use crate::config::Config;
use crate::github::GitHubRepo;
use crate::runtime::Runtime;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// List remote skills and their status against the local installation.
#[tracing::instrument(skip(runtime, config))]
#[allow(clippy::too_many_arguments)]
pub async fn list<R: Runtime>(
    runtime: &R,
    config: &Config,
    repo: &GitHubRepo,
    path: &str,
    reference: &str,
    install_root: PathBuf,
    format: OutputFormat,
) -> Result<()> {
    debug!("Listing skills from {} under {}", repo, path);

    let engine = DiffEngine::new(runtime, &config.contents, repo, path, reference, install_root);
    let statuses = engine.diff().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&statuses)?),
        OutputFormat::Text => print!("{}", render_text(repo, path, reference, &statuses)),
    }
    Ok(())
}

/// Full text report: numbered status lines, per-status sections, and
/// next-step guidance.
fn render_text(repo: &GitHubRepo, path: &str, reference: &str, statuses: &[ItemStatus]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Skills from {}:\n", repo.tree_url(reference, path)));
    for (idx, status) in statuses.iter().enumerate() {
        out.push_str(&format!("{}. {} [{}]\n", idx + 1, status.name, status_label(status)));
    }
    out.push('\n');

    let not_installed = names_with(statuses, Status::NotInstalled);
    let needs_update = names_with(statuses, Status::NeedsUpdate);
    let latest = names_with(statuses, Status::Latest);
    out.push_str(&section("Not installed", &not_installed));
    out.push('\n');
    out.push_str(&section("Need update", &needs_update));
    out.push('\n');
    out.push_str(&section("Latest version", &latest));
    out.push('\n');

    out.push_str(&guidance(repo, path, reference, statuses));
    out
}

fn names_with(statuses: &[ItemStatus], status: Status) -> Vec<&str> {
    statuses
        .iter()
        .filter(|s| s.status == status)
        .map(|s| s.name.as_str())
        .collect()
}

fn section(title: &str, names: &[&str]) -> String {
    let mut out = format!("{}:\n", title);
    if names.is_empty() {
        out.push_str("- (none)\n");
    } else {
        for name in names {
            out.push_str(&format!("- {}\n", name));
        }
    }
    out
}

fn status_label(status: &ItemStatus) -> String {
    match status.status {
        Status::NotInstalled => match &status.remote_version {
            Some(version) => format!("not installed, remote v{}", version),
            None => "not installed".to_string(),
        },
        Status::NeedsUpdate => match &status.reason {
            Some(reason) => format!("needs update: {}", reason),
            None => "needs update".to_string(),
        },
        Status::Latest => match &status.remote_version {
            Some(version) => format!("latest version: v{}", version),
            None => "latest version".to_string(),
        },
    }
}

fn guidance(repo: &GitHubRepo, path: &str, reference: &str, statuses: &[ItemStatus]) -> String {
    let pending = statuses.iter().any(|s| s.is_pending());
    let mut out = String::from("Next step:\n");
    if pending {
        out.push_str("- Install all pending skills:\n");
        out.push_str(&format!(
            "    skillsync install --repo {} --path {} --ref {}\n",
            repo, path, reference
        ));
    } else {
        out.push_str("- All listed skills are at the latest version.\n");
    }
    out
}
