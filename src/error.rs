//! Error types for the fallible library boundaries.
//!
//! Only a handful of conditions ever cross the library boundary:
//! - `ScanError`: the project root cannot be resolved or is not a directory
//! - `SessionError`: a `ProjectSession` was asked to analyze before a scan,
//!   or with an empty selection
//! - `ConfigError`: a settings file could not be read or parsed
//!
//! Everything else (unreadable files, unresolvable references, dynamic
//! include expressions) degrades the output and is reported through
//! `tracing` instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors for a scan call.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root could not be canonicalized (missing, permission denied, ...).
    #[error("project root is unreachable: {path}: {source}")]
    RootUnreachable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("project root is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

/// Errors raised by `ProjectSession` before any analysis runs.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("project not scanned yet")]
    NotScanned,

    #[error("no files selected")]
    EmptySelection,

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Errors loading a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A `PREFIX=DIR` mapping argument without the `=`.
    #[error("invalid prefix mapping '{0}', expected PREFIX=DIR")]
    InvalidMapping(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
