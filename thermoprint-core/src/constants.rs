//! Protocol constants

/// Escape
pub const ESC: u8 = 0x1B;

/// Group separator, prefix of most graphics/barcode commands
pub const GS: u8 = 0x1D;

/// Line feed
pub const LF: u8 = 0x0A;

/// Dot widths of common paper sizes
pub mod paper {
    /// 58mm paper, 203 DPI
    pub const WIDTH_58MM: u32 = 384;

    /// 80mm paper, 203 DPI
    pub const WIDTH_80MM: u32 = 576;
}

/// Font size banding (points → multiplier)
pub mod font {
    /// Upper point bound of each band; band index is the multiplier
    pub const POINT_BANDS: [u32; 5] = [12, 18, 24, 36, 48];

    /// Multiplier used above the last band
    pub const MAX_BAND_MULTIPLIER: u8 = 5;

    /// Hardware limit of each multiplier nibble
    pub const MULTIPLIER_CAP: u8 = 7;
}

/// QR code (`GS ( k`) parameters
pub mod qr {
    /// Store command sub-opcode bytes preceding the data
    pub const STORE_HEADER: [u8; 3] = [0x31, 0x50, 0x30];

    /// Largest payload whose length field (payload + 3) fits in 16 bits
    pub const MAX_DATA_LEN: usize = u16::MAX as usize - STORE_HEADER.len();
}

/// Barcode (`GS k`) parameters
pub mod barcode {
    /// Data length travels in a single byte
    pub const MAX_DATA_LEN: usize = u8::MAX as usize;
}

/// Raster image (`GS v 0`) parameters
pub mod raster {
    /// `GS v 0 m` with normal density
    pub const HEADER: [u8; 4] = [0x1D, 0x76, 0x30, 0x00];

    /// Luminance above this value is background
    pub const THRESHOLD: u8 = 128;

    /// Both size fields are 16-bit
    pub const MAX_DIMENSION: u32 = u16::MAX as u32;
}
