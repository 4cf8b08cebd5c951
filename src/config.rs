//! Shared configuration for commands.

use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::github::GitHubContents;

pub struct Config {
    pub contents: GitHubContents,
    pub client: Client,
}

impl Config {
    /// Build the shared HTTP client and catalog client.
    ///
    /// The credential is resolved once by the caller at startup; the core
    /// never reads ambient environment state itself. An absent credential
    /// means unauthenticated requests, which the remote may rate-limit.
    pub fn new(token: Option<String>, api_url: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut auth_value = HeaderValue::from_str(&format!("token {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using access token for authentication");
        }

        let client = Client::builder()
            .user_agent("skillsync-cli")
            .default_headers(headers)
            .build()?;

        let contents = GitHubContents::new(client.clone(), api_url);

        Ok(Self { contents, client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    // When a token is supplied, every request carries it.
    #[tokio::test]
    async fn test_config_new_with_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("Authorization", "token test_token")
            .create_async()
            .await;

        let config = Config::new(Some("test_token".to_string()), None).unwrap();
        let _ = config.client.get(server.url()).send().await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_config_new_without_token_sends_no_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("Authorization", mockito::Matcher::Missing)
            .create_async()
            .await;

        let config = Config::new(None, None).unwrap();
        let _ = config.client.get(server.url()).send().await;

        mock.assert_async().await;
    }

    #[test]
    fn test_config_default_api_url() {
        let config = Config::new(None, None).unwrap();
        assert_eq!(config.contents.api_url, "https://api.github.com");
    }

    #[test]
    fn test_config_api_url_override() {
        let config = Config::new(None, Some("http://127.0.0.1:9999".to_string())).unwrap();
        assert_eq!(config.contents.api_url, "http://127.0.0.1:9999");
    }
}
