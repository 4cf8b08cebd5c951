use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use super::error::CatalogError;
use super::repo::GitHubRepo;
use super::types::{ContentEntry, ContentFile};

/// Read-only access to a remote skill catalog.
///
/// All requests are synchronous from the caller's point of view and
/// single-shot: one network failure is fatal and reported, never retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Contents: Send + Sync {
    /// Names of directory entries under `path` at `reference`,
    /// deduplicated and in lexicographic order. Non-directory entries are
    /// discarded.
    async fn list_dirs(
        &self,
        repo: &GitHubRepo,
        path: &str,
        reference: &str,
    ) -> Result<Vec<String>, CatalogError>;

    /// Decoded text content of one file.
    ///
    /// A missing or undecodable file is `Ok(None)`, not an error; absence
    /// of a descriptor is expected for malformed or legacy skills.
    async fn read_file_text(
        &self,
        repo: &GitHubRepo,
        file_path: &str,
        reference: &str,
    ) -> Result<Option<String>, CatalogError>;
}

pub struct GitHubContents {
    pub client: Client,
    pub api_url: String,
}

impl GitHubContents {
    #[tracing::instrument(skip(client, api_url))]
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| "https://api.github.com".to_string());
        Self { client, api_url }
    }
}

#[async_trait]
impl Contents for GitHubContents {
    #[tracing::instrument(skip(self, repo))]
    async fn list_dirs(
        &self,
        repo: &GitHubRepo,
        path: &str,
        reference: &str,
    ) -> Result<Vec<String>, CatalogError> {
        let url = repo.contents_url(&self.api_url, path);

        debug!("Listing {} at {}...", path, url);

        let response = self
            .client
            .get(&url)
            .query(&[("ref", reference)])
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(repo.tree_url(reference, path)));
        }

        let response = response
            .error_for_status()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let entries: Vec<ContentEntry> = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        let mut names: Vec<String> = entries
            .into_iter()
            .filter(ContentEntry::is_dir)
            .map(|entry| entry.name)
            .collect();
        names.sort();
        names.dedup();

        Ok(names)
    }

    #[tracing::instrument(skip(self, repo))]
    async fn read_file_text(
        &self,
        repo: &GitHubRepo,
        file_path: &str,
        reference: &str,
    ) -> Result<Option<String>, CatalogError> {
        let url = repo.contents_url(&self.api_url, file_path);

        debug!("Reading {} at {}...", file_path, url);

        let response = self
            .client
            .get(&url)
            .query(&[("ref", reference)])
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        match response.json::<ContentFile>().await {
            Ok(file) => Ok(file.decode_text()),
            Err(e) => {
                debug!("Unexpected payload for {}: {}", file_path, e);
                Ok(None)
            }
        }
    }
}
