//! Raster image conversion
//!
//! Turns a decoded RGB buffer into the printer's monochrome raster format:
//! 1. Scale to the printer's dot width, keeping the aspect ratio
//! 2. Threshold luminance `0.299 R + 0.587 G + 0.114 B` at 128
//! 3. Pack 8 horizontal dots per byte, MSB first, 1 = ink
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use image::{RgbImage, imageops::{self, FilterType}};
use tracing::{debug, trace};

use crate::{
    constants::raster::{HEADER, MAX_DIMENSION, THRESHOLD},
    error::{Error, Result},
};

/// Packed monochrome bitmap
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in dots
    pub width: u32,

    /// Height in dots
    pub height: u32,

    /// Row-major packed rows, `bytes_per_line()` bytes each
    pub data: Bytes,
}

impl RasterImage {
    /// Raster command header size (`GS v 0 m xL xH yL yH`)
    pub const HEADER_SIZE: usize = 8;

    /// Bytes per packed row: `ceil(width / 8)`
    pub fn bytes_per_line(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Whether the dot at (`x`, `y`) is inked
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y as usize * self.bytes_per_line() + (x / 8) as usize];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Length of the encoded raster command
    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE + self.data.len()
    }

    /// Append the `GS v 0` raster command to `buf`
    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_slice(&HEADER);
        buf.put_u16_le(self.bytes_per_line() as u16);
        buf.put_u16_le(self.height as u16);
        buf.put_slice(&self.data);
    }

    /// Encode as a complete `GS v 0` raster command
    ///
    /// # Examples
    ///
    /// ```
    /// use image::{Rgb, RgbImage};
    /// use thermoprint_core::raster;
    ///
    /// let image = RgbImage::from_pixel(16, 2, Rgb([0, 0, 0]));
    /// let raster = raster::convert(&image, 16).unwrap();
    /// let bytes = raster.encode();
    ///
    /// assert_eq!(&bytes[..8], &[0x1D, 0x76, 0x30, 0x00, 2, 0, 2, 0]);
    /// assert_eq!(bytes.len(), 8 + 4);
    /// ```
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes_per_line", &self.bytes_per_line())
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Integer luminance of an RGB pixel (fractional part dropped)
///
/// Computed in fixed point so that e.g. pure white is exactly 255. Exact
/// arithmetic differs from a float rendition for (31, 203, 5) only: it
/// yields 129 (background), not 128.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000) as u8
}

/// Whether a pixel prints as ink: luminance at or below the threshold
pub fn is_ink(r: u8, g: u8, b: u8) -> bool {
    luminance(r, g, b) <= THRESHOLD
}

/// Scaled height for a target width, at least 1 dot
fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let ratio = f64::from(target_width) / f64::from(width);
    ((f64::from(height) * ratio) as u32).max(1)
}

/// Convert an RGB image to a raster bitmap `target_dot_width` dots wide
///
/// # Errors
///
/// Returns an error if:
/// - the source image or the target width is zero
/// - the scaled height does not fit the 16-bit size field
pub fn convert(image: &RgbImage, target_dot_width: u32) -> Result<RasterImage> {
    let (width, height) = image.dimensions();

    if width == 0 || height == 0 {
        return Err(Error::InvalidImage(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    if target_dot_width == 0 {
        return Err(Error::InvalidImage("target dot width must be positive".into()));
    }

    let target_height = scaled_height(width, height, target_dot_width);

    if target_dot_width > MAX_DIMENSION || target_height > MAX_DIMENSION {
        return Err(Error::ImageTooLarge {
            width: target_dot_width,
            height: target_height,
            max: MAX_DIMENSION,
        });
    }

    debug!(
        "Rasterizing {}x{} image to {}x{} dots",
        width, height, target_dot_width, target_height
    );

    let scaled;
    let source = if (width, height) == (target_dot_width, target_height) {
        image
    } else {
        scaled = imageops::resize(image, target_dot_width, target_height, FilterType::Triangle);
        &scaled
    };

    let raster = pack(source);

    trace!(
        "Packed {} bytes: {}",
        raster.data.len(),
        hex::encode(&raster.data[..raster.data.len().min(32)])
    );

    Ok(raster)
}

/// Threshold and pack an image without scaling
fn pack(image: &RgbImage) -> RasterImage {
    let (width, height) = image.dimensions();
    let bytes_per_line = (width as usize).div_ceil(8);
    let mut data = BytesMut::zeroed(bytes_per_line * height as usize);

    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        if is_ink(r, g, b) {
            data[y as usize * bytes_per_line + (x / 8) as usize] |= 0x80 >> (x % 8);
        }
    }

    RasterImage {
        width,
        height,
        data: data.freeze(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_luminance_known_values() {
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 0, 0), 76);
        assert_eq!(luminance(0, 255, 0), 149);
        assert_eq!(luminance(0, 0, 255), 29);
        assert_eq!(luminance(128, 128, 128), 128);

        // 0.299*31 + 0.587*203 + 0.114*5 is exactly 129
        assert_eq!(luminance(31, 203, 5), 129);
        assert!(!is_ink(31, 203, 5));
    }

    #[test]
    fn test_threshold_mapping() {
        // White and pure green are background, everything at or below 128 is ink
        assert!(!is_ink(255, 255, 255));
        assert!(!is_ink(0, 255, 0));
        assert!(!is_ink(129, 129, 129));
        assert!(is_ink(128, 128, 128));
        assert!(is_ink(255, 0, 0));
        assert!(is_ink(0, 0, 255));
        assert!(is_ink(0, 0, 0));
    }

    #[test]
    fn test_two_pixel_image() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([255, 255, 255]));
        image.put_pixel(1, 0, Rgb([0, 0, 0]));

        let raster = convert(&image, 2).unwrap();

        assert_eq!(raster.width, 2);
        assert_eq!(raster.height, 1);
        assert_eq!(&raster.data[..], &[0b0100_0000]);
        assert!(!raster.is_ink(0, 0));
        assert!(raster.is_ink(1, 0));
    }

    #[test]
    fn test_trailing_bits_are_background() {
        let image = RgbImage::from_pixel(10, 1, Rgb([0, 0, 0]));
        let raster = convert(&image, 10).unwrap();

        assert_eq!(raster.bytes_per_line(), 2);
        assert_eq!(&raster.data[..], &[0xFF, 0b1100_0000]);
    }

    #[test]
    fn test_encode_header() {
        let image = RgbImage::from_pixel(9, 3, Rgb([0, 0, 0]));
        let bytes = convert(&image, 9).unwrap().encode();

        assert_eq!(&bytes[..8], &[0x1D, 0x76, 0x30, 0x00, 0x02, 0x00, 0x03, 0x00]);
        assert_eq!(bytes.len(), 8 + 2 * 3);
    }

    #[test]
    fn test_scale_keeps_aspect_ratio() {
        let image = RgbImage::from_pixel(100, 50, Rgb([255, 255, 255]));
        let raster = convert(&image, 384).unwrap();

        assert_eq!(raster.width, 384);
        assert_eq!(raster.height, 192);
        assert_eq!(raster.data.len(), 48 * 192);
        assert!(raster.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_scale_down_height_at_least_one() {
        let image = RgbImage::from_pixel(1000, 1, Rgb([0, 0, 0]));
        let raster = convert(&image, 384).unwrap();

        assert_eq!(raster.height, 1);
        assert_eq!(raster.data.len(), 48);
    }

    #[test]
    fn test_zero_sized_image_rejected() {
        let image = RgbImage::new(0, 10);
        assert!(matches!(convert(&image, 384), Err(Error::InvalidImage(_))));

        let image = RgbImage::new(10, 0);
        assert!(matches!(convert(&image, 384), Err(Error::InvalidImage(_))));
    }

    #[test]
    fn test_zero_target_width_rejected() {
        let image = RgbImage::new(10, 10);
        assert!(matches!(convert(&image, 0), Err(Error::InvalidImage(_))));
    }

    #[test]
    fn test_too_tall_rejected() {
        let image = RgbImage::new(1, 200);
        let result = convert(&image, 384);
        assert!(matches!(result, Err(Error::ImageTooLarge { height: 76800, .. })));
    }

    proptest! {
        #[test]
        fn prop_row_length_is_ceil_width(width in 1u32..64, height in 1u32..8) {
            let image = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
            let raster = convert(&image, width).unwrap();

            let expected = (width as usize + 7) / 8;
            prop_assert_eq!(raster.bytes_per_line(), expected);
            prop_assert_eq!(raster.data.len(), expected * height as usize);

            // Padding bits past the right edge stay clear
            let pad = expected * 8 - width as usize;
            let mask = ((1u16 << pad) - 1) as u8;
            for row in raster.data.chunks(expected) {
                prop_assert_eq!(row[expected - 1] & mask, 0);
            }
        }
    }
}
