//! Error types for receipt rendering

use karat_printer::PrintError;
use thiserror::Error;

/// Rendering failures
///
/// Numeric input problems are not errors here: they degrade to zero while
/// the payload is deserialized. A variant of this enum means no output was
/// produced.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Paper width does not map to a known tier
    #[error("Unsupported paper width {requested:?}: expected 58mm, 80mm or 112mm")]
    UnsupportedPaperWidth { requested: String },

    /// Tracking QR base URL could not be parsed
    #[error("Invalid tracking URL: {0}")]
    InvalidTrackingUrl(#[from] url::ParseError),

    /// Sink failed after the receipt was fully rendered
    #[error("Transport failed: {0}")]
    Transport(#[from] PrintError),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
