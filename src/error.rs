use std::io;

/// Errors from dictionary and learning-data file I/O.
///
/// Nothing in the suggestion path returns this; malformed input there
/// degrades to empty or low-confidence results instead.
#[derive(Debug, thiserror::Error)]
pub enum AutocorrectError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("dictionary JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("learning data error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("could not replace file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, AutocorrectError>;
