//! Error definitions for the client.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {source}")]
    HttpClient {
        #[from]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Credentials file {}: {message}", path.display())]
    Credentials { path: PathBuf, message: String },

    #[error("Source file {}: {message}", path.display())]
    SourceFile { path: PathBuf, message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// 是否为本地错误（请求发出前即失败）。
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::Credentials { .. }
                | Self::SourceFile { .. }
                | Self::Io { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
