//! Error types for sansliterate library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::script::TransliterationError;
use crate::transform::RunLocation;

/// Result type alias for sansliterate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while transliterating a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist or is not a regular file.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The output path resolves to the input path.
    #[error("Output path must be different from input path: {}", .0.display())]
    SameInputOutput(PathBuf),

    /// The document container is malformed or unreadable.
    #[error("Failed to load document: {0}")]
    DocumentLoad(String),

    /// The transliteration engine rejected a Sanskrit span.
    #[error("Transliteration failed at {location} for {text:?}: {source}")]
    Transliteration {
        /// Where the offending run lives in the document
        location: RunLocation,
        /// The original text of the run
        text: String,
        /// Underlying engine error
        #[source]
        source: TransliterationError,
    },

    /// The output document could not be written.
    #[error("Failed to save document: {0}")]
    DocumentSave(String),

    /// The change report could not be serialized.
    #[error("Report error: {0}")]
    Report(String),
}

impl Error {
    /// Check if this error was raised before any output could be written.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::DocumentLoad(_) | Error::InputNotFound(_) | Error::SameInputOutput(_)
        )
    }
}
