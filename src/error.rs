//! Crate-level error type

use crate::config::ConfigError;
use crate::document::ParseError;
use crate::encoding::EncodingError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("Could not read pom file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not create backup file {path}: {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("The file {0} is not sorted")]
    NotSorted(PathBuf),
}
