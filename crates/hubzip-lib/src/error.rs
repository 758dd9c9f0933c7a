use crate::repository::ParseRepositoryError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type. Each variant corresponds to one step of the
/// per-repository pipeline; the step-specific error is attached as the
/// source so the CLI can report "what failed" and "why" on separate lines.
#[derive(Error, Debug)]
pub enum HubzipError {
    #[error("invalid owner/repository reference: {token}")]
    InvalidReference {
        token: String,
        #[source]
        source: ParseRepositoryError,
    },

    #[error("unable to download: {owner}/{repository}")]
    Download {
        owner: String,
        repository: String,
        #[source]
        source: DownloadError,
    },

    #[error("unable to decompress: {filename}")]
    Extraction {
        filename: String,
        #[source]
        source: ExtractionError,
    },

    #[error(transparent)]
    Cleanup(#[from] CleanupError),
}

/// Errors raised while fetching an archive over HTTP.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("invalid archive URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid content type: expected application/zip, got {}", found.as_deref().unwrap_or("none"))]
    InvalidContentType { found: Option<String> },

    #[error("invalid content disposition: {value}")]
    InvalidContentDisposition { value: String },

    #[error("invalid content length: {value}")]
    InvalidContentLength { value: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to write archive to disk: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while extracting a downloaded archive.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("failed to open archive {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read archive {path}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive entry has an unsafe path: {name}")]
    UnsafeEntryPath { name: String },

    #[error("failed to extract entry {name}")]
    Entry {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Error raised when the downloaded archive cannot be deleted after
/// extraction.
#[derive(Error, Debug)]
#[error("unable to remove: {}", path.display())]
pub struct CleanupError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
