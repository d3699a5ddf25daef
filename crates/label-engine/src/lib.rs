//! QR label rendering engine.
//!
//! Encodes a URL into a QR symbol, lays it out on a square canvas, a
//! dimensioned rectangle, or a zone of a background template, and fits a
//! caption underneath by shrinking the font until it fits.

pub mod capacity;
pub mod caption;
pub mod compose;
pub mod fit;
pub mod font;
pub mod layout;
pub mod qr;
pub mod request;
pub mod resize;
pub mod text;

use std::path::PathBuf;

// Re-exports for convenience
pub use capacity::{CapacityEntry, max_chars, module_count};
pub use caption::derive_caption;
pub use fit::{FontFit, TextMeasure, fit_font_size};
pub use font::{CaptionFont, FontSet};
pub use layout::{RenderedLabel, render};
pub use qr::{QrRaster, encode};
pub use request::{ErrorCorrection, LabelRequest, Layout, Zone};

/// QR version used when the caller asks for one outside 1..=40.
pub const DEFAULT_QR_VERSION: u8 = 1;

/// Highest QR version defined by the standard.
pub const MAX_QR_VERSION: u8 = 40;

/// Errors that can occur while rendering a label.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Invalid label parameter: {0}")]
    Validation(String),

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    #[error("QR encode error: {0}")]
    QrEncode(#[from] qrcode::types::QrError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for label operations.
pub type Result<T> = std::result::Result<T, LabelError>;
