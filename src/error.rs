use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected manifest structure: {0}")]
    Schema(String),
}

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("Invalid major version in build '{build}': {source}")]
    InvalidMajor {
        build: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot derive minimum major version: {0}")]
    SinceBuild(String),
}

/// Any failure that aborts a run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),
}
