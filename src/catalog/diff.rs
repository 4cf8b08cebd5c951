//! Classification of remote skills against the local installation.

use std::cmp::Ordering;
use std::path::PathBuf;

use anyhow::Result;
use log::debug;
use serde::Serialize;

use crate::catalog::{descriptor, version};
use crate::github::{Contents, GitHubRepo};
use crate::runtime::Runtime;

/// Installation status of one remote skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotInstalled,
    NeedsUpdate,
    Latest,
}

/// One remote skill classified against the local install root.
///
/// Recomputed on every run; nothing is cached between invocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStatus {
    pub name: String,
    pub installed: bool,
    pub status: Status,
    pub reason: Option<String>,
    pub local_version: Option<String>,
    pub remote_version: Option<String>,
}

impl ItemStatus {
    /// A pending skill is a candidate for installation in the current run.
    pub fn is_pending(&self) -> bool {
        matches!(self.status, Status::NotInstalled | Status::NeedsUpdate)
    }
}

/// Combines the catalog client, descriptor parsing and local filesystem
/// inspection into one status per remote skill.
pub struct DiffEngine<'a, R: Runtime, C: Contents> {
    runtime: &'a R,
    contents: &'a C,
    repo: &'a GitHubRepo,
    path: &'a str,
    reference: &'a str,
    install_root: PathBuf,
}

impl<'a, R: Runtime, C: Contents> DiffEngine<'a, R, C> {
    pub fn new(
        runtime: &'a R,
        contents: &'a C,
        repo: &'a GitHubRepo,
        path: &'a str,
        reference: &'a str,
        install_root: PathBuf,
    ) -> Self {
        Self {
            runtime,
            contents,
            repo,
            path,
            reference,
            install_root,
        }
    }

    /// Classify every remote skill, preserving the listing's lexicographic
    /// order. Exactly one status is produced per name.
    #[tracing::instrument(skip(self))]
    pub async fn diff(&self) -> Result<Vec<ItemStatus>> {
        let names = self
            .contents
            .list_dirs(self.repo, self.path, self.reference)
            .await?;

        debug!("Found {} remote skill(s) under {}", names.len(), self.path);

        let mut statuses = Vec::with_capacity(names.len());
        for name in names {
            let remote_version = self.remote_version(&name).await;
            statuses.push(self.classify(name, remote_version));
        }
        Ok(statuses)
    }

    /// Declared version of the remote descriptor. Any read or parse
    /// problem is absent, not an error; a missing version is informative
    /// input to the classifier.
    async fn remote_version(&self, name: &str) -> Option<String> {
        let file_path = descriptor_path(self.path, name);
        match self
            .contents
            .read_file_text(self.repo, &file_path, self.reference)
            .await
        {
            Ok(Some(text)) => descriptor::version_from_descriptor(&text),
            Ok(None) => None,
            Err(e) => {
                debug!("Failed to read remote descriptor for {}: {}", name, e);
                None
            }
        }
    }

    /// Declared version of the locally installed descriptor, if any.
    fn local_version(&self, name: &str) -> Option<String> {
        let skill_md = self
            .install_root
            .join(name)
            .join(descriptor::DESCRIPTOR_FILE);
        if !self.runtime.is_file(&skill_md) {
            return None;
        }
        match self.runtime.read_to_string(&skill_md) {
            Ok(text) => descriptor::version_from_descriptor(&text),
            Err(e) => {
                debug!("Failed to read local descriptor for {}: {}", name, e);
                None
            }
        }
    }

    fn classify(&self, name: String, remote_version: Option<String>) -> ItemStatus {
        if !self.runtime.is_dir(&self.install_root.join(&name)) {
            return ItemStatus {
                name,
                installed: false,
                status: Status::NotInstalled,
                reason: None,
                local_version: None,
                remote_version,
            };
        }

        let local_version = self.local_version(&name);

        // An unversioned remote skill is always treated as newer than
        // anything local; there is no way to prove otherwise.
        let Some(remote) = remote_version else {
            return ItemStatus {
                name,
                installed: true,
                status: Status::NeedsUpdate,
                reason: Some("remote metadata.version missing".to_string()),
                local_version,
                remote_version: None,
            };
        };

        // Symmetrically, an installed-but-unversioned local copy cannot be
        // proven current.
        let Some(local) = local_version else {
            return ItemStatus {
                name,
                installed: true,
                status: Status::NeedsUpdate,
                reason: Some("local metadata.version missing".to_string()),
                local_version: None,
                remote_version: Some(remote),
            };
        };

        if version::compare(&local, &remote) == Ordering::Less {
            let reason = format!("v{} -> v{}", local, remote);
            ItemStatus {
                name,
                installed: true,
                status: Status::NeedsUpdate,
                reason: Some(reason),
                local_version: Some(local),
                remote_version: Some(remote),
            }
        } else {
            ItemStatus {
                name,
                installed: true,
                status: Status::Latest,
                reason: None,
                local_version: Some(local),
                remote_version: Some(remote),
            }
        }
    }
}

/// Remote path of a skill's descriptor file.
fn descriptor_path(path: &str, name: &str) -> String {
    let normalized = path.trim_matches('/');
    if normalized.is_empty() {
        format!("{}/{}", name, descriptor::DESCRIPTOR_FILE)
    } else {
        format!("{}/{}/{}", normalized, name, descriptor::DESCRIPTOR_FILE)
    }
}
