use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing command-line input
    #[error("{0}")]
    Usage(String),
    /// Source archive could not be opened or decoded
    #[error("Archive read error: {0}")]
    ArchiveRead(String),
    /// Output archive could not be written
    #[error("Archive write error: {0}")]
    ArchiveWrite(String),
    /// An XML entry is not valid UTF-8
    #[error("Encoding error in {}: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },
    /// Configuration file is malformed or holds invalid values
    #[error("Config error: {0}")]
    Config(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(String),
}

impl AppError {
    /// Whether the error is reported gracefully instead of propagating out of `main`.
    pub fn is_usage(&self) -> bool {
        matches!(self, AppError::Usage(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
