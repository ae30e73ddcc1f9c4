//! Storage module for downloaded assets
//!
//! Product images are kept on the local filesystem, one folder per product.

mod image_store;

pub use image_store::{ImageStore, SavedImages};

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
