use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge entry #{0} has an empty keyword")]
    EmptyKeyword(usize),

    #[error("Keyword '{0}' is defined more than once")]
    DuplicateKeyword(String),

    #[error("Invalid knowledge table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read knowledge table {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Model returned an empty response")]
    EmptyOutput,

    #[error("Model backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Message is empty")]
    EmptyInput,
}
