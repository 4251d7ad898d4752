use std::io;
use thiserror::Error;

/// Errors produced while saving a [`Network`](crate::types::network::Network)
/// into a `.dbc` file.
#[derive(Debug, Error)]
pub enum DbcSaveError {
    #[error("Output path must end in .dbc: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to create '{path}'. \nError: {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create directories for '{path}'. \nError: {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while writing '{path}'. \nError: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to format DBC content")]
    Format,
}
