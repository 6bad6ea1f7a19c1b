//! Error types for the presentation layer.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for view construction.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised while building text views.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A reveal rate must be a positive, finite number of glyphs per second.
    #[error("reveal rate must be positive and finite, got {0}")]
    InvalidRevealRate(f32),

    /// The render surface has a zero dimension.
    #[error("view size must be non-zero, got {width}x{height}")]
    EmptyViewport {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// A font file could not be read.
    #[error("cannot read font {}: {source}", path.display())]
    FontRead {
        /// Font file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Font data is not a usable TrueType/OpenType font.
    #[error("invalid font data: {0}")]
    FontParse(String),
}
