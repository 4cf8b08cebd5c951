//! Bulk fetch-and-place of pending skills.
//!
//! The transfer itself is an external program; this module only constructs
//! its invocation and inspects the exit status. Anything beyond
//! zero/non-zero is opaque.

use std::path::Path;

use anyhow::{Result, bail};
use log::debug;

use crate::github::GitHubRepo;
use crate::process::Launcher;

/// Program invoked for bulk content transfer unless overridden.
pub const DEFAULT_FETCH_PROGRAM: &str = "skillsync-fetch";

#[cfg_attr(test, mockall::automock)]
pub trait Fetcher: Send + Sync {
    /// Place the named remote paths under the install root.
    ///
    /// Returns the transfer program's combined output on success. Any
    /// non-zero outcome is an overall failure; no skill can be assumed
    /// present afterwards.
    fn fetch(
        &self,
        repo: &GitHubRepo,
        reference: &str,
        paths: &[String],
        replace: bool,
    ) -> Result<String>;
}

/// Runs the external fetch program in the current working directory.
pub struct CommandFetcher<'a, L: Launcher> {
    launcher: &'a L,
    program: String,
}

impl<'a, L: Launcher> CommandFetcher<'a, L> {
    pub fn new(launcher: &'a L, program: String) -> Self {
        Self { launcher, program }
    }
}

impl<L: Launcher> Fetcher for CommandFetcher<'_, L> {
    #[tracing::instrument(skip(self, repo, paths))]
    fn fetch(
        &self,
        repo: &GitHubRepo,
        reference: &str,
        paths: &[String],
        replace: bool,
    ) -> Result<String> {
        let mut args = vec![
            "--repo".to_string(),
            repo.to_string(),
            "--ref".to_string(),
            reference.to_string(),
            "--path".to_string(),
        ];
        args.extend(paths.iter().cloned());
        if replace {
            args.push("--replace".to_string());
        }

        debug!("Fetching {} skill path(s) via {}", paths.len(), self.program);

        let result = self.launcher.run(&self.program, &args, Path::new("."))?;
        if !result.success {
            if result.output.is_empty() {
                bail!("{} failed with exit {}", self.program, result.exit_label());
            }
            bail!(
                "{} failed with exit {}:\n{}",
                self.program,
                result.exit_label(),
                result.output
            );
        }
        Ok(result.output)
    }
}
