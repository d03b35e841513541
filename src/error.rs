//! Error types for pager operations

use std::io;
use thiserror::Error;

/// Pager error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A requested input file could not be opened
    #[error("'{path}' file not found: {source}")]
    OpenFile { path: String, source: io::Error },

    /// The control terminal could not be opened
    #[error("failed to open control terminal: {0}")]
    OpenTty(io::Error),

    /// System call error
    #[error("system error: {0}")]
    Nix(#[from] nix::Error),
}

/// Result type for pager operations
pub type Result<T> = std::result::Result<T, Error>;
