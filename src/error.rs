use thiserror::Error;

/// Errors raised while talking to the recipe API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure or unreadable response body
    #[error("Failed to fetch URL: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// The API answered 2xx but the body does not match the expected schema
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The configured endpoint cannot be turned into a request URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Errors raised by the durable key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Top-level error for setting up and driving the application
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Failed to read user input
    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
