use std::path::PathBuf;

use thiserror::Error;

/// Errors from the ledger store.
///
/// A missing ledger file is not an error (it loads as an empty ledger);
/// a malformed one is surfaced as `CorruptStore` instead of being silently
/// discarded, so a bad row can never wipe the diary on the next save.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to access ledger file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ledger file {path} is malformed: {detail}")]
    CorruptStore { path: PathBuf, detail: String },

    #[error("no entry at position {position} (ledger has {len} entries)")]
    OutOfRange { position: usize, len: usize },

    #[error("no entry with id {id}")]
    UnknownEntry { id: u64 },
}

/// Errors from the remote food lookup boundary.
///
/// Each variant carries its own user-facing message; none are retried.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error(
        "the search timed out — this usually means a slow connection or the food database is down"
    )]
    Timeout,

    #[error("the food database server is busy (HTTP {status}); try again in a moment")]
    Unavailable { status: u16 },

    #[error("connection error: {0}")]
    Connection(String),
}
