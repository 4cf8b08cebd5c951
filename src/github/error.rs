use std::fmt;

/// Errors from the catalog listing endpoints.
///
/// Kept as a dedicated type so callers can tell a missing remote path apart
/// from transport or payload problems and print an actionable message.
#[derive(Debug)]
pub enum CatalogError {
    /// The remote path does not exist (HTTP 404). Carries the browsing URL
    /// so the user can check the repository in a browser.
    NotFound(String),
    /// Any other non-success HTTP outcome or request failure.
    Transport(String),
    /// The listing payload could not be parsed as the expected structure.
    Decode(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound(url) => write!(f, "Skills path not found: {}", url),
            CatalogError::Transport(msg) => write!(f, "Failed to fetch skills: {}", msg),
            CatalogError::Decode(msg) => write!(f, "Failed to parse skills list: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}
