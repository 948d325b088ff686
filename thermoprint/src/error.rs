//! High-level error types
//!
//! Every failure a [`Printer`](crate::Printer) reports is one of a closed
//! set of kinds. Each kind has a stable machine code (see
//! [`ErrorKind::code`]) alongside the human readable message.

use std::fmt;

use thermoprint_transport::Error as TransportError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    #[error("Disconnection failed: {message}")]
    DisconnectionFailed {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    #[error("Printer not connected")]
    NotConnected,

    #[error("Print failed: {message}")]
    PrintFailed {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        message: String,
        #[source]
        source: Option<thermoprint_core::Error>,
    },

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Permission denied: {message}")]
    PermissionDenied {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    #[error("Device not found: {message}")]
    DeviceNotFound {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    #[error("Transport unavailable: {message}")]
    TransportUnavailable {
        message: String,
        #[source]
        source: Option<TransportError>,
    },
}

/// Error kind, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConnectionFailed,
    DisconnectionFailed,
    NotConnected,
    PrintFailed,
    InvalidParameter,
    UnsupportedType,
    PermissionDenied,
    DeviceNotFound,
    TransportUnavailable,
}

impl ErrorKind {
    /// Stable machine-readable code
    pub fn code(self) -> &'static str {
        match self {
            Self::ConnectionFailed => "CONNECTION_FAILED",
            Self::DisconnectionFailed => "DISCONNECTION_FAILED",
            Self::NotConnected => "NOT_CONNECTED",
            Self::PrintFailed => "PRINT_FAILED",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::UnsupportedType => "UNSUPPORTED_TYPE",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::DeviceNotFound => "DEVICE_NOT_FOUND",
            Self::TransportUnavailable => "TRANSPORT_UNAVAILABLE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Error {
    /// Build an `InvalidParameter` error without a cause
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            source: None,
        }
    }

    /// Classify a failure while opening or initializing a connection
    pub fn from_connect(err: TransportError) -> Self {
        let message = err.to_string();
        match err {
            TransportError::DeviceNotFound(_) | TransportError::InvalidAddress(_) => {
                Self::DeviceNotFound { message, source: Some(err) }
            }
            TransportError::PermissionDenied(_) => {
                Self::PermissionDenied { message, source: Some(err) }
            }
            TransportError::Unavailable(_) => {
                Self::TransportUnavailable { message, source: Some(err) }
            }
            _ => Self::ConnectionFailed { message, source: Some(err) },
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConnectionFailed { .. } => ErrorKind::ConnectionFailed,
            Self::DisconnectionFailed { .. } => ErrorKind::DisconnectionFailed,
            Self::NotConnected => ErrorKind::NotConnected,
            Self::PrintFailed { .. } => ErrorKind::PrintFailed,
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::UnsupportedType(_) => ErrorKind::UnsupportedType,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::DeviceNotFound { .. } => ErrorKind::DeviceNotFound,
            Self::TransportUnavailable { .. } => ErrorKind::TransportUnavailable,
        }
    }

    /// Stable machine-readable code of the error kind
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Check if the printer must be connected again before the next print
    pub fn requires_reconnect(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ConnectionFailed
                | ErrorKind::NotConnected
                | ErrorKind::PrintFailed
                | ErrorKind::DeviceNotFound
                | ErrorKind::TransportUnavailable
        )
    }
}

impl From<thermoprint_core::Error> for Error {
    fn from(err: thermoprint_core::Error) -> Self {
        Self::InvalidParameter {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<thermoprint_types::Error> for Error {
    fn from(err: thermoprint_types::Error) -> Self {
        match err {
            thermoprint_types::Error::Unsupported(name) => Self::UnsupportedType(name),
            other => Self::invalid_parameter(other.to_string()),
        }
    }
}
