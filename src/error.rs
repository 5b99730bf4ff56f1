//! Run-level error taxonomy. Everything recoverable stays a log line or a
//! structured warning; these variants are the aborts.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("glob pattern matched no files: {pattern}")]
    EmptyGlob { pattern: String },

    #[error("input root does not exist: {path}")]
    MissingRoot { path: PathBuf },

    #[error("cannot write schema to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("strict mode: run produced {count} warning(s)")]
    Strict { count: usize },
}
