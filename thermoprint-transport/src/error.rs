//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,

    #[error("Connection timeout")]
    ConnectionTimeout,

    #[error("Write timeout")]
    WriteTimeout,

    #[error("Connection closed by remote")]
    ConnectionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    /// Check if the error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConnectionTimeout | Self::WriteTimeout)
    }

    /// Check if the peer went away
    pub fn is_disconnect(&self) -> bool {
        match self {
            Self::NotConnected | Self::ConnectionClosed => true,
            Self::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::BrokenPipe
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::UnexpectedEof
            ),
            _ => false,
        }
    }
}
