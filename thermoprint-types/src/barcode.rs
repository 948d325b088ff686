//! Barcode symbologies and options

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::text::Alignment;

/// Barcode symbologies supported by `GS k`
///
/// The discriminant is the symbology byte sent to the printer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Symbology {
    UpcA = 0,
    UpcE = 1,
    Ean13 = 2,
    Ean8 = 3,
    Code39 = 4,
    Itf = 5,
    Codabar = 6,
    Code93 = 72,
    Code128 = 73,
}

impl Symbology {
    pub const ALL: [Symbology; 9] = [
        Self::UpcA,
        Self::UpcE,
        Self::Ean13,
        Self::Ean8,
        Self::Code39,
        Self::Itf,
        Self::Codabar,
        Self::Code93,
        Self::Code128,
    ];

    /// Symbology byte for the barcode command
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::UpcA => "UPC_A",
            Self::UpcE => "UPC_E",
            Self::Ean13 => "EAN13",
            Self::Ean8 => "EAN8",
            Self::Code39 => "CODE39",
            Self::Itf => "ITF",
            Self::Codabar => "CODABAR",
            Self::Code93 => "CODE93",
            Self::Code128 => "CODE128",
        }
    }
}

impl FromStr for Symbology {
    type Err = Error;

    /// Case-insensitive; `-` and `_` separators are both accepted
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|symbology| symbology.name() == normalized)
            .ok_or_else(|| Error::Unsupported(format!("barcode type {s}")))
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.code())
    }
}

/// Position of the human readable interpretation (HRI) text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HriPosition {
    None = 0,
    Above = 1,
    #[default]
    Below = 2,
    Both = 3,
}

impl HriPosition {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl FromStr for HriPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "ABOVE" => Ok(Self::Above),
            "BELOW" => Ok(Self::Below),
            "BOTH" => Ok(Self::Both),
            other => Err(Error::Parse(format!("unknown text position: {other}"))),
        }
    }
}

/// Barcode print options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeOptions {
    /// Module width, clamped to 2..=6 at encode time
    pub width: u8,

    /// Bar height in dots, clamped to 1..=255 at encode time
    pub height: u16,

    pub align: Alignment,

    pub text_position: HriPosition,
}

impl BarcodeOptions {
    pub const DEFAULT_WIDTH: u8 = 2;
    pub const DEFAULT_HEIGHT: u16 = 162;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: u8) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn with_text_position(mut self, position: HriPosition) -> Self {
        self.text_position = position;
        self
    }

    pub fn clamped_width(&self) -> u8 {
        self.width.clamp(2, 6)
    }

    pub fn clamped_height(&self) -> u8 {
        self.height.clamp(1, 255) as u8
    }
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            align: Alignment::default(),
            text_position: HriPosition::default(),
        }
    }
}
