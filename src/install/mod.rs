//! Install run-loop: diff, bulk fetch, per-skill hooks, aggregation.
//!
//! The run is strictly sequential: one network call or subprocess at a
//! time, so output ordering is deterministic and a hook failure is
//! attributed before the next skill starts. There is no persisted state
//! between runs; a re-run after a partial failure re-attempts every
//! still-pending skill.

pub mod fetcher;
pub mod hooks;
pub mod paths;

use std::path::PathBuf;

use anyhow::Result;
use log::{debug, warn};

use crate::catalog::DiffEngine;
use crate::github::{Contents, GitHubRepo};
use crate::process::Launcher;
use crate::runtime::Runtime;

use fetcher::Fetcher;

/// One pending skill's installation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemResult {
    pub name: String,
    pub success: bool,
    pub detail: String,
}

/// Aggregated outcome of one install run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstallReport {
    /// Names selected for installation, in diff order.
    pub pending: Vec<String>,
    /// Combined output of the bulk fetch program.
    pub fetch_output: String,
    /// One entry per pending skill, in the same order.
    pub results: Vec<ItemResult>,
}

impl InstallReport {
    pub fn nothing_to_do(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Drives installation of every pending skill, tolerating per-skill hook
/// failures.
pub struct Orchestrator<'a, R: Runtime, C: Contents, F: Fetcher, L: Launcher> {
    runtime: &'a R,
    contents: &'a C,
    fetcher: &'a F,
    launcher: &'a L,
    repo: &'a GitHubRepo,
    path: &'a str,
    reference: &'a str,
    install_root: PathBuf,
}

impl<'a, R: Runtime, C: Contents, F: Fetcher, L: Launcher> Orchestrator<'a, R, C, F, L> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        runtime: &'a R,
        contents: &'a C,
        fetcher: &'a F,
        launcher: &'a L,
        repo: &'a GitHubRepo,
        path: &'a str,
        reference: &'a str,
        install_root: PathBuf,
    ) -> Self {
        Self {
            runtime,
            contents,
            fetcher,
            launcher,
            repo,
            path,
            reference,
            install_root,
        }
    }

    /// Diff, fetch, run hooks, aggregate.
    ///
    /// A listing failure or a bulk fetch failure aborts the whole run; no
    /// hooks execute after a failed fetch since no skill can be assumed
    /// present. A hook failure is isolated to its skill and never blocks
    /// the remaining skills.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, replace: bool) -> Result<InstallReport> {
        let engine = DiffEngine::new(
            self.runtime,
            self.contents,
            self.repo,
            self.path,
            self.reference,
            self.install_root.clone(),
        );
        let statuses = engine.diff().await?;

        let pending: Vec<String> = statuses
            .iter()
            .filter(|status| status.is_pending())
            .map(|status| status.name.clone())
            .collect();

        if pending.is_empty() {
            debug!("Nothing pending; all skills current");
            return Ok(InstallReport::default());
        }

        debug!("Installing {} pending skill(s)", pending.len());

        let remote = paths::remote_paths(self.path, &pending);
        let fetch_output = self
            .fetcher
            .fetch(self.repo, self.reference, &remote, replace)?;

        let mut results = Vec::with_capacity(pending.len());
        for name in &pending {
            let skill_dir = self.install_root.join(name);
            let result = match hooks::run_hook(self.runtime, self.launcher, &skill_dir) {
                Ok(outcome) => ItemResult {
                    name: name.clone(),
                    success: outcome.success,
                    detail: outcome.detail,
                },
                Err(e) => {
                    warn!("Hook for {} could not be launched: {}", name, e);
                    ItemResult {
                        name: name.clone(),
                        success: false,
                        detail: e.to_string(),
                    }
                }
            };
            results.push(result);
        }

        Ok(InstallReport {
            pending,
            fetch_output,
            results,
        })
    }
}
