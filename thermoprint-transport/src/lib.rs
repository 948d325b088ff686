//! Transport layer for thermal printers
//!
//! A transport is a one-way byte stream to a printer. The session layer
//! only needs to open it, push bytes through it and close it again.

pub mod error;
pub mod tcp;

pub use error::{Error, Result};
pub use tcp::TcpTransport;

use async_trait::async_trait;

/// Byte-stream transport to a printer
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the stream to `target`
    ///
    /// The target format is transport specific (`host[:port]` for TCP).
    async fn open(&mut self, target: &str) -> Result<()>;

    /// Close the stream
    ///
    /// Closing an already closed transport is a no-op.
    async fn close(&mut self) -> Result<()>;

    /// Write all of `data`
    async fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Flush buffered bytes to the printer
    async fn flush(&mut self) -> Result<()>;

    /// Check if the stream is open
    fn is_open(&self) -> bool;

    /// Address of the open peer
    fn peer(&self) -> Option<String>;

    /// Short transport label ("tcp", "bluetooth", ...)
    fn kind(&self) -> &'static str;
}
