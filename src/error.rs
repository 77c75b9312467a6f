use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirewatchError {
    #[error("Cannot open log file {path}: {source}")]
    LogOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Log read failed: {0}")]
    LogRead(#[from] std::io::Error),

    #[error("Log line is not valid UTF-8 at byte offset {offset}")]
    InvalidUtf8 { offset: u64 },

    #[error("Cannot read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid font file {0}")]
    InvalidFont(PathBuf),

    #[error("Cannot write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Unknown log field: {0}")]
    UnknownField(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, DirewatchError>;
