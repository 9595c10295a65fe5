use std::io;

use thiserror::Error;

/// StoreError is the type of Error that occurred while reading or writing client state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// DefaultConfigDirNotFound occurs when the default OS config can't be found.
    #[error("Could not determine default OS configuration directory.")]
    DefaultConfigDirNotFound,

    /// InvalidConfigHome occurs when the configuration home exists but is not a directory.
    #[error("'{0}' already exists and is not a directory.")]
    InvalidConfigHome(String),

    /// InvalidKey occurs when a key contains characters other than `[A-Za-z0-9_-]`.
    #[error("'{0}' is not a valid key. Keys may only contain letters, digits, '-' and '_'.")]
    InvalidKey(String),

    /// NotSignedIn occurs when a session is required but none is stored.
    #[error("No session is stored.")]
    NotSignedIn,

    /// PathNotUtf8 occurs when a file path is not valid UTF-8.
    #[error(transparent)]
    PathNotUtf8(#[from] camino::FromPathBufError),

    /// Json occurs when a stored value can't be serialized or deserialized.
    #[error("Could not read or write '{key}': {source}")]
    Json {
        /// The key being read or written
        key: String,
        /// The underlying serde_json error
        source: serde_json::Error,
    },

    /// IoError occurs when any given std::io::Error arises.
    #[error(transparent)]
    IoError(#[from] io::Error),
}
