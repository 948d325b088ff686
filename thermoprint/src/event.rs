//! Connection lifecycle events

use std::fmt;

use chrono::{DateTime, Utc};

/// Event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Transport opened and printer initialized
    Connected,

    /// Connection closed on request
    Disconnected,

    /// Connection failed to open or dropped during a write
    ConnectionLost,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::ConnectionLost => "connection_lost",
        }
    }
}

/// Lifecycle notification published by a [`Printer`](crate::Printer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterEvent {
    pub kind: EventKind,

    /// Target the printer was connected (or connecting) to
    pub target: String,

    /// Failure description, only set for [`EventKind::ConnectionLost`]
    pub error: Option<String>,

    pub at: DateTime<Utc>,
}

impl PrinterEvent {
    pub fn connected(target: impl Into<String>) -> Self {
        Self::new(EventKind::Connected, target.into(), None)
    }

    pub fn disconnected(target: impl Into<String>) -> Self {
        Self::new(EventKind::Disconnected, target.into(), None)
    }

    pub fn connection_lost(target: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(EventKind::ConnectionLost, target.into(), Some(error.into()))
    }

    fn new(kind: EventKind, target: String, error: Option<String>) -> Self {
        Self {
            kind,
            target,
            error,
            at: Utc::now(),
        }
    }
}

impl fmt::Display for PrinterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.name(), self.target)?;
        if let Some(error) = &self.error {
            write!(f, ": {}", error)?;
        }
        Ok(())
    }
}
