use thiserror::Error;

/// Failures of a single merge invocation. None of them is retried; the
/// caller fixes the input and calls again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("no input files supplied")]
    EmptyInput,

    #[error("file name '{name}' was supplied more than once")]
    DuplicateFile { name: String },

    #[error(
        "merge order is not a permutation of the uploaded files \
         (missing: {missing:?}, unknown: {unknown:?}, duplicated: {duplicated:?})"
    )]
    OrderMismatch {
        missing: Vec<String>,
        unknown: Vec<String>,
        duplicated: Vec<String>,
    },

    #[error("failed to parse '{file}': {message}")]
    Parse { file: String, message: String },

    #[error("failed to write combined CSV: {0}")]
    Write(String),
}

pub type MergeResult<T> = std::result::Result<T, MergeError>;
