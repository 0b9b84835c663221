use thiserror::Error;

/// Errors that can occur while fetching, remixing or storing recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Network failure, non-success status or undecodable response body
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failed to decode JSON outside of an HTTP response
    #[error("Failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Search by name returned no match
    #[error("No recipe named '{0}'")]
    NotFound(String),

    /// Response decoded but a required field was missing
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Durable storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, RecipeError>;

impl RecipeError {
    /// True when the remote source answered but had no matching recipe
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecipeError::NotFound(_))
    }
}
