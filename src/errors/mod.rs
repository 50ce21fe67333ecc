use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatReaderError {
    // Transport errors
    #[error("Could not connect to API: {0}")]
    Unreachable(String),

    #[error("Request timed out")]
    TimedOut,

    #[error("Invalid response from API: {0}")]
    MalformedResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Errors reported by the server in an `error` field
    #[error("{0}")]
    Api(String),

    // Local preconditions
    #[error("Please login first: ratreader login")]
    NotLoggedIn,

    #[error("Article {0} not found")]
    ArticleNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file {} is corrupt ({source}); fix or delete it", path.display())]
    CorruptSession {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RatReaderError {
    /// Whether the process should terminate with a failure status.
    ///
    /// Server-reported errors and local precondition failures only abort the
    /// current command.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            RatReaderError::Api(_)
                | RatReaderError::NotLoggedIn
                | RatReaderError::ArticleNotFound(_)
                | RatReaderError::InvalidInput(_)
                | RatReaderError::InvalidUrl(_)
        )
    }
}

impl From<dialoguer::Error> for RatReaderError {
    fn from(err: dialoguer::Error) -> Self {
        RatReaderError::Prompt(err.to_string())
    }
}

pub type RatReaderResult<T> = Result<T, RatReaderError>;
