//! # thermoprint-core
//!
//! Core ESC/POS implementation for thermal receipt printers.
//!
//! This crate provides the protocol primitives:
//! - Fixed command table
//! - Command encoding (text formatting, QR codes, barcodes, cut, drawer)
//! - Raster image conversion
//! - Session state tracking

pub mod command;
pub mod constants;
pub mod encoder;
pub mod error;
pub mod raster;
pub mod session;

pub use command::Command;
pub use error::{Error, Result};
pub use raster::RasterImage;
pub use session::{Session, SessionState};
