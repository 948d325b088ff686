//! Raster image print options

use crate::text::Alignment;

/// Image print options
///
/// The image is always scaled to a fixed dot width; `width` overrides the
/// printer's configured paper width for a single print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageOptions {
    /// Target width in dots
    pub width: Option<u32>,

    /// Justification command sent ahead of the image
    pub align: Option<Alignment>,
}

impl ImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }
}
