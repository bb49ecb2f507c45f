// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("output path is a directory: {}", .0.display())]
    OutputIsDirectory(PathBuf),

    #[error("{}: missing required column {column:?} (found: {found})", path.display())]
    MissingColumn {
        path: PathBuf,
        column: String,
        found: String,
    },

    #[error("{}: file is empty (no header row)", path.display())]
    EmptyInput { path: PathBuf },

    #[error("config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no input file (pass one, or set [input] path in the config)")]
    NoInput,

    #[error("invalid search endpoint {0:?}: {1}")]
    Endpoint(String, #[source] url::ParseError),

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),
}
