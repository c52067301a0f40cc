//! Error types for the cvpress library.

use std::io;
use thiserror::Error;

/// Result type alias for cvpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading content or exporting a document.
///
/// The front-matter parser never produces any of these: it is best-effort by
/// contract and degrades malformed input to plain strings.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when saving an exported document or reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid JSON at a loading boundary (résumé profile or manifest).
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A manifest that parsed as JSON but violates its own invariants.
    #[error("Invalid manifest: {0}")]
    Manifest(String),

    /// Error during layout or PDF assembly.
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Render("page narrower than twice the margin".to_string());
        assert_eq!(
            err.to_string(),
            "Rendering error: page narrower than twice the margin"
        );

        let err = Error::Manifest("duplicate slug: ghostrush".to_string());
        assert_eq!(err.to_string(), "Invalid manifest: duplicate slug: ghostrush");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
