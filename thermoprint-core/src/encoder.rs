//! ESC/POS command encoding
//!
//! Pure functions turning print requests into printer byte sequences.
//! Nothing here performs I/O; the byte layouts are fixed by the printer
//! firmware and must be reproduced exactly.
//!
//! # QR Code Layout
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬────────────────────┬──────────┬────┐
//! │  ESC a n │ model 2  │ mod size │ ec level │ store: pL pH 31 50 │  print   │ LF │
//! │ 3 bytes  │ 9 bytes  │ 8 bytes  │ 8 bytes  │ 30 + data (8 + N)  │ 8 bytes  │ 1  │
//! └──────────┴──────────┴──────────┴──────────┴────────────────────┴──────────┴────┘
//! ```
//!
//! `pL pH` is the little-endian length of the data plus the three store
//! sub-opcode bytes.

use bytes::{BufMut, Bytes, BytesMut};
use image::RgbImage;
use tracing::{debug, trace};

use thermoprint_types::{
    BarcodeOptions, FontSize, ImageOptions, PrintOptions, QrOptions, Rotation, Symbology,
    TextEffects,
};

use crate::{
    command::Command,
    constants::{GS, LF, barcode, font, qr},
    error::{Error, Result},
    raster,
};

/// Printer initialization (`ESC @`), sent once per connection
pub fn encode_init() -> Bytes {
    Bytes::from_static(Command::Init.as_bytes())
}

/// Formatting commands preceding a text print
///
/// Emitted in order: alignment (whenever set, even `Left`), bold,
/// underline, character size, then the extended effects.
///
/// # Examples
///
/// ```
/// use thermoprint_core::encoder;
/// use thermoprint_types::{Alignment, PrintOptions};
///
/// let options = PrintOptions::new().with_align(Alignment::Center).with_bold(true);
/// let bytes = encoder::encode_text_formatting(&options);
/// assert_eq!(&bytes[..], &[0x1B, 0x61, 0x01, 0x1B, 0x45, 0x01]);
/// ```
pub fn encode_text_formatting(options: &PrintOptions) -> Bytes {
    let mut buf = BytesMut::with_capacity(32);

    if let Some(align) = options.align {
        buf.put_slice(Command::align(align).as_bytes());
    }

    if options.bold {
        buf.put_slice(Command::BoldOn.as_bytes());
    }

    if options.underline {
        buf.put_slice(Command::UnderlineOn.as_bytes());
    }

    match options.size {
        Some(FontSize::Named(size)) if size.is_double() => {
            buf.put_slice(Command::SizeDouble.as_bytes());
        }
        Some(FontSize::Named(_)) => buf.put_slice(Command::SizeNormal.as_bytes()),
        Some(FontSize::Points(points)) => buf.put_slice(&encode_font_size(points)),
        None => {}
    }

    if let Some(font) = options.font {
        buf.put_slice(Command::font(font).as_bytes());
    }

    for (effect, command) in [
        (TextEffects::ITALIC, Command::ItalicOn),
        (TextEffects::STRIKETHROUGH, Command::StrikethroughOn),
        (TextEffects::DOUBLE_STRIKE, Command::DoubleStrikeOn),
        (TextEffects::INVERT, Command::InvertOn),
    ] {
        if options.effects.contains(effect) {
            buf.put_slice(command.as_bytes());
        }
    }

    match options.rotation {
        Some(Rotation::None) => buf.put_slice(Command::Rotate90Off.as_bytes()),
        Some(Rotation::Cw90) => buf.put_slice(Command::Rotate90On.as_bytes()),
        Some(Rotation::Upside180) => buf.put_slice(Command::UpsideDownOn.as_bytes()),
        Some(Rotation::Cw270) => {
            buf.put_slice(Command::Rotate90On.as_bytes());
            buf.put_slice(Command::UpsideDownOn.as_bytes());
        }
        None => {}
    }

    trace!(options = ?options, bytes = %hex::encode(&buf), "Encoded text formatting");

    buf.freeze()
}

/// Character size command (`GS ! n`) for a point size
///
/// Point sizes fall into fixed bands rather than scaling linearly:
///
/// | Points | Multiplier | `n`  |
/// |--------|------------|------|
/// | ≤ 12   | 0          | 0x00 |
/// | ≤ 18   | 1          | 0x11 |
/// | ≤ 24   | 2          | 0x22 |
/// | ≤ 36   | 3          | 0x33 |
/// | ≤ 48   | 4          | 0x44 |
/// | > 48   | 5          | 0x55 |
///
/// # Examples
///
/// ```
/// use thermoprint_core::encoder;
///
/// assert_eq!(&encoder::encode_font_size(24)[..], &[0x1D, 0x21, 0x22]);
/// ```
pub fn encode_font_size(points: u32) -> Bytes {
    let band = font::POINT_BANDS
        .iter()
        .position(|&upper| points <= upper)
        .map(|index| index as u8)
        .unwrap_or(font::MAX_BAND_MULTIPLIER);

    let width = band.min(font::MULTIPLIER_CAP);
    let height = band.min(font::MULTIPLIER_CAP);

    Bytes::copy_from_slice(&[GS, 0x21, (width << 4) | height])
}

/// Restore default formatting: left aligned, bold off, underline off,
/// normal size
pub fn encode_reset_formatting() -> Bytes {
    let mut buf = BytesMut::with_capacity(12);
    for command in [
        Command::AlignLeft,
        Command::BoldOff,
        Command::UnderlineOff,
        Command::SizeNormal,
    ] {
        buf.put_slice(command.as_bytes());
    }
    buf.freeze()
}

/// Switch off the extended effects that `options` switched on
///
/// Strikethrough shares `ESC -` with underline and is cleared by
/// [`encode_reset_formatting`]. Empty for options without extended
/// effects.
pub fn encode_clear_effects(options: &PrintOptions) -> Bytes {
    let mut buf = BytesMut::new();

    if options.font.is_some() {
        buf.put_slice(Command::FontA.as_bytes());
    }
    if options.effects.contains(TextEffects::ITALIC) {
        buf.put_slice(Command::ItalicOff.as_bytes());
    }
    if options.effects.contains(TextEffects::DOUBLE_STRIKE) {
        buf.put_slice(Command::DoubleStrikeOff.as_bytes());
    }
    if options.effects.contains(TextEffects::INVERT) {
        buf.put_slice(Command::InvertOff.as_bytes());
    }
    if options.rotation.is_some() {
        buf.put_slice(Command::Rotate90Off.as_bytes());
        buf.put_slice(Command::UpsideDownOff.as_bytes());
    }

    buf.freeze()
}

/// Text line: UTF-8 bytes followed by a line feed
pub fn encode_text(text: &str) -> Bytes {
    let mut buf = BytesMut::with_capacity(text.len() + 1);
    buf.put_slice(text.as_bytes());
    buf.put_u8(LF);
    buf.freeze()
}

/// Paper cut (`GS V 0`)
pub fn encode_cut() -> Bytes {
    Bytes::from_static(Command::Cut.as_bytes())
}

/// Cash drawer pulse on pin 2 (`ESC p 0 25 250`)
pub fn encode_cash_drawer_kick() -> Bytes {
    Bytes::from_static(Command::CashDrawerKick.as_bytes())
}

/// Raw passthrough for vendor-specific sequences
pub fn encode_raw(data: &[u8]) -> Bytes {
    Bytes::copy_from_slice(data)
}

/// QR code print sequence
///
/// # Errors
///
/// Returns an error if:
/// - `data` is empty
/// - the UTF-8 length plus 3 does not fit the 16-bit length field
///
/// # Examples
///
/// ```
/// use thermoprint_core::encoder;
/// use thermoprint_types::QrOptions;
///
/// let bytes = encoder::encode_qr("A", &QrOptions::default()).unwrap();
/// assert_eq!(bytes.len(), 46);
/// ```
pub fn encode_qr(data: &str, options: &QrOptions) -> Result<Bytes> {
    let payload = data.as_bytes();

    if payload.is_empty() {
        return Err(Error::EmptyData { what: "QR data" });
    }

    if payload.len() > qr::MAX_DATA_LEN {
        return Err(Error::PayloadTooLarge {
            what: "QR data",
            size: payload.len(),
            max: qr::MAX_DATA_LEN,
        });
    }

    let store_len = (payload.len() + qr::STORE_HEADER.len()) as u16;

    let mut buf = BytesMut::with_capacity(45 + payload.len());

    buf.put_slice(Command::align(options.align).as_bytes());
    buf.put_slice(Command::QrSelectModel2.as_bytes());

    // Module size (function 167)
    buf.put_slice(&[GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43]);
    buf.put_u8(options.clamped_module_size());

    // Error correction level (function 169)
    buf.put_slice(&[GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45]);
    buf.put_u8(options.error_correction.code());

    // Store data in symbol area (function 180)
    buf.put_slice(&[GS, 0x28, 0x6B]);
    buf.put_u16_le(store_len);
    buf.put_slice(&qr::STORE_HEADER);
    buf.put_slice(payload);

    buf.put_slice(Command::QrPrint.as_bytes());
    buf.put_u8(LF);

    debug!(
        data_len = payload.len(),
        module_size = options.clamped_module_size(),
        error_correction = ?options.error_correction,
        "Encoded QR code ({} bytes)",
        buf.len()
    );

    Ok(buf.freeze())
}

/// Barcode print sequence
///
/// # Errors
///
/// Returns an error if `data` is empty or longer than 255 bytes.
pub fn encode_barcode(
    data: &str,
    symbology: Symbology,
    options: &BarcodeOptions,
) -> Result<Bytes> {
    let payload = data.as_bytes();

    if payload.is_empty() {
        return Err(Error::EmptyData { what: "Barcode data" });
    }

    if payload.len() > barcode::MAX_DATA_LEN {
        return Err(Error::PayloadTooLarge {
            what: "Barcode data",
            size: payload.len(),
            max: barcode::MAX_DATA_LEN,
        });
    }

    let mut buf = BytesMut::with_capacity(14 + payload.len());

    buf.put_slice(Command::align(options.align).as_bytes());
    buf.put_slice(&[GS, 0x77, options.clamped_width()]);
    buf.put_slice(&[GS, 0x68, options.clamped_height()]);
    buf.put_slice(&[GS, 0x48, options.text_position.code()]);

    buf.put_slice(&[GS, 0x6B, symbology.code(), payload.len() as u8]);
    buf.put_slice(payload);
    buf.put_u8(LF);

    debug!(
        %symbology,
        data_len = payload.len(),
        "Encoded barcode ({} bytes)",
        buf.len()
    );

    Ok(buf.freeze())
}

/// Raster image print sequence
///
/// Scales the image to `options.width` (or `default_width`) dots and emits
/// an optional alignment command followed by the `GS v 0` raster command.
pub fn encode_image(
    image: &RgbImage,
    options: &ImageOptions,
    default_width: u32,
) -> Result<Bytes> {
    let target_width = options.width.unwrap_or(default_width);
    let raster = raster::convert(image, target_width)?;

    let mut buf = BytesMut::with_capacity(3 + raster.encoded_len());
    if let Some(align) = options.align {
        buf.put_slice(Command::align(align).as_bytes());
    }
    raster.encode_into(&mut buf);

    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use thermoprint_types::{Alignment, ErrorCorrection, HriPosition, NamedSize};

    fn size_byte(points: u32) -> u8 {
        encode_font_size(points)[2]
    }

    #[test]
    fn test_init() {
        assert_eq!(&encode_init()[..], &[0x1B, 0x40]);
    }

    #[test]
    fn test_font_size_bands() {
        assert_eq!(size_byte(12), 0x00);
        assert_eq!(size_byte(13), 0x11);
        assert_eq!(size_byte(18), 0x11);
        assert_eq!(size_byte(19), 0x22);
        assert_eq!(size_byte(24), 0x22);
        assert_eq!(size_byte(36), 0x33);
        assert_eq!(size_byte(48), 0x44);
        assert_eq!(size_byte(49), 0x55);
        assert_eq!(size_byte(200), 0x55);
        assert_eq!(&encode_font_size(30)[..2], &[0x1D, 0x21]);
    }

    proptest! {
        #[test]
        fn prop_small_points_are_normal(points in 0u32..=12) {
            prop_assert_eq!(size_byte(points), 0x00);
        }

        #[test]
        fn prop_medium_points_double(points in 13u32..=18) {
            prop_assert_eq!(size_byte(points), 0x11);
        }

        #[test]
        fn prop_multiplier_never_exceeds_band_cap(points in any::<u32>()) {
            let n = size_byte(points);
            prop_assert_eq!(n >> 4, n & 0x0F);
            prop_assert!(n >> 4 <= 5);
        }
    }

    #[test]
    fn test_text_formatting_order() {
        let options = PrintOptions::new()
            .with_align(Alignment::Right)
            .with_bold(true)
            .with_underline(true)
            .with_size(NamedSize::Large);

        let bytes = encode_text_formatting(&options);
        assert_eq!(
            &bytes[..],
            &[
                0x1B, 0x61, 0x02, // align right
                0x1B, 0x45, 0x01, // bold on
                0x1B, 0x2D, 0x01, // underline on
                0x1D, 0x21, 0x11, // double size
            ]
        );
    }

    #[test]
    fn test_text_formatting_left_is_explicit() {
        let options = PrintOptions::new().with_align(Alignment::Left);
        assert_eq!(&encode_text_formatting(&options)[..], &[0x1B, 0x61, 0x00]);
    }

    #[test]
    fn test_text_formatting_defaults_empty() {
        assert!(encode_text_formatting(&PrintOptions::default()).is_empty());
    }

    #[test]
    fn test_named_sizes() {
        let xlarge = PrintOptions::new().with_size(NamedSize::XLarge);
        let small = PrintOptions::new().with_size(NamedSize::Small);
        let normal = PrintOptions::new().with_size(NamedSize::Normal);

        assert_eq!(&encode_text_formatting(&xlarge)[..], &[0x1D, 0x21, 0x11]);
        assert_eq!(&encode_text_formatting(&small)[..], &[0x1D, 0x21, 0x00]);
        assert_eq!(&encode_text_formatting(&normal)[..], &[0x1D, 0x21, 0x00]);
    }

    #[test]
    fn test_point_size_in_formatting() {
        let options = PrintOptions::new().with_size(36u32);
        assert_eq!(&encode_text_formatting(&options)[..], &[0x1D, 0x21, 0x33]);
    }

    #[test]
    fn test_reset_formatting() {
        assert_eq!(
            &encode_reset_formatting()[..],
            &[
                0x1B, 0x61, 0x00, 0x1B, 0x45, 0x00, 0x1B, 0x2D, 0x00, 0x1D, 0x21, 0x00
            ]
        );
    }

    #[test]
    fn test_reset_restores_center_bold() {
        let options = PrintOptions::new()
            .with_align(Alignment::Center)
            .with_bold(true);

        let applied = encode_text_formatting(&options);
        let reset = encode_reset_formatting();

        // Every attribute the formatting touched is switched back to its default
        let touched: Vec<&str> = applied
            .chunks(3)
            .map(|chunk| Command::try_from(chunk).unwrap().name())
            .collect();
        let restored: Vec<Command> = reset
            .chunks(3)
            .map(|chunk| Command::try_from(chunk).unwrap())
            .collect();

        assert!(restored.iter().all(|cmd| cmd.is_reset()));
        for name in touched {
            assert!(restored.iter().any(|cmd| cmd.name() == name));
        }
        assert_eq!(
            restored,
            vec![
                Command::AlignLeft,
                Command::BoldOff,
                Command::UnderlineOff,
                Command::SizeNormal
            ]
        );
    }

    #[test]
    fn test_extended_effects() {
        let options = PrintOptions::new()
            .with_font(thermoprint_types::FontType::B)
            .with_effects(TextEffects::ITALIC | TextEffects::INVERT)
            .with_rotation(Rotation::Cw270);

        assert_eq!(
            &encode_text_formatting(&options)[..],
            &[
                0x1B, 0x4D, 0x01, // font B
                0x1B, 0x34, 0x01, // italic
                0x1D, 0x42, 0x01, // invert
                0x1B, 0x56, 0x01, // 90 degrees
                0x1B, 0x7B, 0x01, // upside down
            ]
        );

        assert_eq!(
            &encode_clear_effects(&options)[..],
            &[
                0x1B, 0x4D, 0x00, 0x1B, 0x34, 0x00, 0x1D, 0x42, 0x00, 0x1B, 0x56, 0x00, 0x1B,
                0x7B, 0x00
            ]
        );
    }

    #[test]
    fn test_clear_effects_empty_for_defaults() {
        let options = PrintOptions::new()
            .with_bold(true)
            .with_effects(TextEffects::STRIKETHROUGH);
        assert!(encode_clear_effects(&options).is_empty());
    }

    #[test]
    fn test_text_line() {
        assert_eq!(&encode_text("Hi")[..], b"Hi\n");
        assert_eq!(&encode_text("é")[..], &[0xC3, 0xA9, 0x0A]);
    }

    #[test]
    fn test_fixed_commands() {
        assert_eq!(&encode_cut()[..], &[0x1D, 0x56, 0x00]);
        assert_eq!(&encode_cash_drawer_kick()[..], &[0x1B, 0x70, 0x00, 0x19, 0xFA]);
        assert_eq!(&encode_raw(&[0x10, 0x04, 0x01])[..], &[0x10, 0x04, 0x01]);
    }

    #[test]
    fn test_qr_single_char() {
        let bytes = encode_qr("A", &QrOptions::default()).unwrap();

        assert_eq!(bytes.len(), 3 + 9 + 8 + 8 + (8 + 1) + 8 + 1);
        assert_eq!(
            &bytes[..],
            &[
                0x1B, 0x61, 0x00, // align left
                0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00, // model 2
                0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 0x06, // module size 6
                0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31, // level M
                0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x50, 0x30, b'A', // store
                0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30, // print
                0x0A,
            ]
        );
    }

    #[test]
    fn test_qr_options() {
        let options = QrOptions::new()
            .with_module_size(99)
            .with_error_correction(ErrorCorrection::H)
            .with_align(Alignment::Center);

        let bytes = encode_qr("hello", &options).unwrap();
        assert_eq!(&bytes[..3], &[0x1B, 0x61, 0x01]);
        assert_eq!(bytes[19], 16);
        assert_eq!(bytes[27], 51);
    }

    #[test]
    fn test_qr_length_field_little_endian() {
        let data = "x".repeat(300);
        let bytes = encode_qr(&data, &QrOptions::default()).unwrap();

        // 303 = 0x012F
        assert_eq!(&bytes[28..36], &[0x1D, 0x28, 0x6B, 0x2F, 0x01, 0x31, 0x50, 0x30]);
    }

    #[test]
    fn test_qr_rejects_empty() {
        let result = encode_qr("", &QrOptions::default());
        assert_eq!(result, Err(Error::EmptyData { what: "QR data" }));
    }

    #[test]
    fn test_qr_rejects_oversized() {
        let data = "x".repeat(qr::MAX_DATA_LEN + 1);
        let result = encode_qr(&data, &QrOptions::default());
        assert!(matches!(result, Err(Error::PayloadTooLarge { size: 65533, .. })));

        let data = "x".repeat(qr::MAX_DATA_LEN);
        assert!(encode_qr(&data, &QrOptions::default()).is_ok());
    }

    #[test]
    fn test_barcode_layout() {
        let options = BarcodeOptions::new()
            .with_align(Alignment::Center)
            .with_width(3)
            .with_height(80)
            .with_text_position(HriPosition::Both);

        let bytes = encode_barcode("12345", Symbology::Code128, &options).unwrap();
        assert_eq!(
            &bytes[..],
            &[
                0x1B, 0x61, 0x01, // align center
                0x1D, 0x77, 0x03, // module width
                0x1D, 0x68, 0x50, // height 80
                0x1D, 0x48, 0x03, // HRI both
                0x1D, 0x6B, 73, 5, b'1', b'2', b'3', b'4', b'5', //
                0x0A,
            ]
        );
    }

    #[test]
    fn test_barcode_defaults_clamped() {
        let bytes =
            encode_barcode("4006381333931", Symbology::Ean13, &BarcodeOptions::new()).unwrap();
        assert_eq!(&bytes[3..12], &[0x1D, 0x77, 2, 0x1D, 0x68, 162, 0x1D, 0x48, 2]);
        assert_eq!(bytes[14], 2);
    }

    #[test]
    fn test_barcode_rejects_bad_data() {
        let options = BarcodeOptions::default();

        assert_eq!(
            encode_barcode("", Symbology::Code39, &options),
            Err(Error::EmptyData { what: "Barcode data" })
        );

        let long = "1".repeat(256);
        assert!(matches!(
            encode_barcode(&long, Symbology::Code39, &options),
            Err(Error::PayloadTooLarge { size: 256, max: 255, .. })
        ));
        assert!(encode_barcode(&"1".repeat(255), Symbology::Code39, &options).is_ok());
    }

    #[test]
    fn test_image_with_alignment() {
        let image = RgbImage::from_pixel(8, 1, image::Rgb([0, 0, 0]));
        let options = ImageOptions::new().with_align(Alignment::Center).with_width(8);

        let bytes = encode_image(&image, &options, 384).unwrap();
        assert_eq!(
            &bytes[..],
            &[0x1B, 0x61, 0x01, 0x1D, 0x76, 0x30, 0x00, 0x01, 0x00, 0x01, 0x00, 0xFF]
        );
    }
}
