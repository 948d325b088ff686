//! Error types for thermoprint-core

/// Result type alias for encoding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core encoding errors
///
/// Every variant is raised before any byte reaches the printer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Nothing to encode
    #[error("{what} must not be empty")]
    EmptyData {
        what: &'static str,
    },

    /// Payload does not fit the command's length field
    #[error("{what} too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        what: &'static str,
        size: usize,
        max: usize,
    },

    /// Source image cannot be rasterized
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Scaled image does not fit the raster size fields
    #[error("Image too large: {width}x{height} dots (max: {max} per side)")]
    ImageTooLarge {
        width: u32,
        height: u32,
        max: u32,
    },

    /// Byte sequence is not a known fixed command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Invalid session state
    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),
}
