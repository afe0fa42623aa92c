use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanseError {
    #[error("failed to read ignore file {path}: {source}")]
    ReadIgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type CleanseResult<T> = Result<T, CleanseError>;
