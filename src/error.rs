//! Error types for web2epub operations.

use thiserror::Error;

/// Errors that can occur while packaging an article.
///
/// Sanitization never fails, so every variant here comes from the output
/// side: the destination writer or the archive encoder.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
