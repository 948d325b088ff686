//! QR code options

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::text::Alignment;

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl ErrorCorrection {
    /// Parameter byte sent to the printer (ASCII '0'..'3')
    pub fn code(self) -> u8 {
        match self {
            Self::L => 48,
            Self::M => 49,
            Self::Q => 50,
            Self::H => 51,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(Error::Parse(format!("unknown error correction level: {other}"))),
        }
    }
}

/// QR code print options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    /// Module (dot) size, clamped to 1..=16 at encode time
    pub module_size: u8,

    pub error_correction: ErrorCorrection,

    pub align: Alignment,
}

impl QrOptions {
    pub const DEFAULT_MODULE_SIZE: u8 = 6;
    pub const MIN_MODULE_SIZE: u8 = 1;
    pub const MAX_MODULE_SIZE: u8 = 16;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module_size(mut self, size: u8) -> Self {
        self.module_size = size;
        self
    }

    pub fn with_error_correction(mut self, level: ErrorCorrection) -> Self {
        self.error_correction = level;
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Module size limited to what the printer accepts
    pub fn clamped_module_size(&self) -> u8 {
        self.module_size
            .clamp(Self::MIN_MODULE_SIZE, Self::MAX_MODULE_SIZE)
    }
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            module_size: Self::DEFAULT_MODULE_SIZE,
            error_correction: ErrorCorrection::default(),
            align: Alignment::default(),
        }
    }
}
