//! Type definitions for thermoprint
//!
//! Print options, barcode/QR parameters and device descriptions shared by
//! the encoder and the printer session.

pub mod barcode;
pub mod device_info;
pub mod error;
pub mod image;
pub mod qr;
pub mod text;

pub use barcode::{BarcodeOptions, HriPosition, Symbology};
pub use device_info::DeviceInfo;
pub use error::{Error, Result};
pub use image::ImageOptions;
pub use qr::{ErrorCorrection, QrOptions};
pub use text::{Alignment, FontSize, FontType, NamedSize, PrintOptions, Rotation, TextEffects};
