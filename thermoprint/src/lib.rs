//! # thermoprint
//!
//! ESC/POS driver for thermal receipt printers.
//!
//! ## Features
//!
//! - Byte-exact ESC/POS encoding for text, QR codes, barcodes and raster images
//! - Async/await API using Tokio
//! - Connection lifecycle events over a broadcast channel
//! - Closed error taxonomy with stable error codes
//!
//! ## Quick Start
//!
//! ```no_run
//! use thermoprint::{Printer, PrintOptions, QrOptions};
//!
//! #[tokio::main]
//! async fn main() -> thermoprint::Result<()> {
//!     let mut printer = Printer::new();
//!     printer.connect("192.168.1.50").await?;
//!
//!     printer.print_text("Hello, printer!", &PrintOptions::new()).await?;
//!     printer.print_qr("https://example.com", &QrOptions::new()).await?;
//!     printer.cut().await?;
//!
//!     printer.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod printer;

// Re-exports
pub use config::PrinterConfig;
pub use error::{Error, ErrorKind, Result};
pub use event::{EventKind, PrinterEvent};
pub use printer::Printer;

// Re-export lower layers
pub use thermoprint_core::{encoder, Command, RasterImage};
pub use thermoprint_transport::{TcpTransport, Transport};
pub use thermoprint_types::{
    Alignment, BarcodeOptions, DeviceInfo, ErrorCorrection, FontSize, FontType, HriPosition,
    ImageOptions, NamedSize, PrintOptions, QrOptions, Rotation, Symbology, TextEffects,
};
