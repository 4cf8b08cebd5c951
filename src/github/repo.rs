use anyhow::{Result, anyhow};
use std::str::FromStr;

#[derive(Debug, PartialEq, Clone)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

impl GitHubRepo {
    /// Contents API URL for `path` (without the `ref` query parameter).
    pub fn contents_url(&self, api_url: &str, path: &str) -> String {
        let normalized = path.trim_matches('/');
        if normalized.is_empty() {
            format!("{}/repos/{}/{}/contents", api_url, self.owner, self.repo)
        } else {
            format!(
                "{}/repos/{}/{}/contents/{}",
                api_url, self.owner, self.repo, normalized
            )
        }
    }

    /// Human-facing browsing URL for `path` at `reference`.
    pub fn tree_url(&self, reference: &str, path: &str) -> String {
        let normalized = path.trim_matches('/');
        let url = format!(
            "https://github.com/{}/{}/tree/{}/{}",
            self.owner, self.repo, reference, normalized
        );
        url.trim_end_matches('/').to_string()
    }
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for GitHubRepo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            Err(anyhow!("Invalid repository format. Expected 'owner/repo'."))
        } else {
            Ok(GitHubRepo {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_repo_valid() {
        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        assert_eq!(
            repo,
            GitHubRepo {
                owner: "owner".to_string(),
                repo: "repo".to_string()
            }
        );
    }

    #[test]
    fn test_parse_github_repo_missing_slash_fails() {
        assert!(GitHubRepo::from_str("just-a-name").is_err());
    }

    #[test]
    fn test_parse_github_repo_empty_parts_fail() {
        assert!(GitHubRepo::from_str("/repo").is_err());
        assert!(GitHubRepo::from_str("owner/").is_err());
        assert!(GitHubRepo::from_str("a/b/c").is_err());
    }

    #[test]
    fn test_display() {
        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        assert_eq!(format!("{}", repo), "owner/repo");
    }

    #[test]
    fn test_contents_url_with_path() {
        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        assert_eq!(
            repo.contents_url("https://api.github.com", "skills"),
            "https://api.github.com/repos/owner/repo/contents/skills"
        );
    }

    #[test]
    fn test_contents_url_strips_slashes() {
        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        assert_eq!(
            repo.contents_url("https://api.github.com", "/skills/"),
            "https://api.github.com/repos/owner/repo/contents/skills"
        );
    }

    #[test]
    fn test_contents_url_empty_path() {
        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        assert_eq!(
            repo.contents_url("https://api.github.com", ""),
            "https://api.github.com/repos/owner/repo/contents"
        );
    }

    #[test]
    fn test_tree_url() {
        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        assert_eq!(
            repo.tree_url("main", "skills"),
            "https://github.com/owner/repo/tree/main/skills"
        );
    }

    #[test]
    fn test_tree_url_empty_path_has_no_trailing_slash() {
        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        assert_eq!(
            repo.tree_url("main", ""),
            "https://github.com/owner/repo/tree/main"
        );
    }
}
