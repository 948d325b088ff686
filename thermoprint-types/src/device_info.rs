//! Connected printer description

use std::fmt;

use chrono::{DateTime, Utc};

/// Printer device information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Transport address (MAC address, `host:port`, ...)
    pub address: String,
    
    /// Name reported by the transport, if any
    pub name: Option<String>,
    
    /// Transport kind ("tcp", "bluetooth", ...)
    pub transport: String,
    
    pub connected: bool,
    
    /// When the current connection was established
    pub connected_at: Option<DateTime<Utc>>,
}

impl DeviceInfo {
    pub fn new(address: impl Into<String>, transport: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            transport: transport.into(),
            connected: false,
            connected_at: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_connection(mut self, connected_at: Option<DateTime<Utc>>) -> Self {
        self.connected = connected_at.is_some();
        self.connected_at = connected_at;
        self
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Printer[{} via {}, {}]",
            self.name.as_deref().unwrap_or(&self.address),
            self.transport,
            if self.connected { "connected" } else { "disconnected" }
        )
    }
}
