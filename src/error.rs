use thiserror::Error;

/// Errors surfaced by forecast providers, the summary client and the CLI.
/// The TUI maps fetch failures to fixed messages and never shows these raw.
#[derive(Error, Debug)]
pub enum TerraCastError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Gemini { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Forecast source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid request: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, TerraCastError>;
