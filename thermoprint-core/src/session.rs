//! Session state for a printer connection
//!
//! A session tracks:
//! - Connection state
//! - Peer identity (transport address of the connected printer)
//! - When the connection was established

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not connected
    Disconnected,

    /// Transport open and printer initialized
    Connected,
}

/// Session manager
///
/// Manages connection state and peer identity.
/// Thread-safe and can be cloned cheaply (Arc internally).
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<parking_lot::RwLock<SessionInner>>,
}

#[derive(Debug)]
struct SessionInner {
    /// Current session state
    state: SessionState,

    /// Address of the connected peer
    peer: Option<String>,

    connected_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a new disconnected session
    pub fn new() -> Self {
        Self {
            inner: Arc::new(parking_lot::RwLock::new(SessionInner {
                state: SessionState::Disconnected,
                peer: None,
                connected_at: None,
            })),
        }
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        self.inner.read().state
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        matches!(self.state(), SessionState::Connected)
    }

    /// Get the connected peer address
    pub fn peer(&self) -> Option<String> {
        self.inner.read().peer.clone()
    }

    /// Get the time the current connection was established
    pub fn connected_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().connected_at
    }

    /// Mark session as connected to `peer`
    ///
    /// Only valid from [`SessionState::Disconnected`]; a reconnect must
    /// close the previous session first.
    pub fn open(&self, peer: impl Into<String>) -> Result<()> {
        let mut inner = self.inner.write();

        if inner.state != SessionState::Disconnected {
            return Err(Error::InvalidSessionState(
                format!("Cannot open from state: {:?}", inner.state)
            ));
        }

        inner.state = SessionState::Connected;
        inner.peer = Some(peer.into());
        inner.connected_at = Some(Utc::now());

        Ok(())
    }

    /// Close session
    ///
    /// Always succeeds. Returns the peer the session was connected to.
    pub fn close(&self) -> Option<String> {
        let mut inner = self.inner.write();
        inner.state = SessionState::Disconnected;
        inner.connected_at = None;
        inner.peer.take()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
