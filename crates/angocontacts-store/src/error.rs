use thiserror::Error;

/// Errors raised by [`crate::KeyValueStore`] backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure reading or writing a key.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Keys must be non-empty ASCII alphanumerics, `_` or `-`.
    #[error("invalid storage key \"{0}\"")]
    InvalidKey(String),
}
