//! Recording transport for printer tests

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use thermoprint::Transport;
use thermoprint_transport::{Error, Result};

/// Failure injected into a fake transport call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    DeviceNotFound,
    PermissionDenied,
    Unavailable,
    Refused,
    BrokenPipe,
}

impl Failure {
    fn to_error(self) -> Error {
        match self {
            Self::DeviceNotFound => Error::DeviceNotFound("no such printer".into()),
            Self::PermissionDenied => Error::PermissionDenied("access refused".into()),
            Self::Unavailable => Error::Unavailable("adapter off".into()),
            Self::Refused => Error::Io(io::Error::from(io::ErrorKind::ConnectionRefused)),
            Self::BrokenPipe => Error::Io(io::Error::from(io::ErrorKind::BrokenPipe)),
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub open: bool,
    pub opens: Vec<String>,
    pub closes: usize,
    pub writes: Vec<Vec<u8>>,
    pub flushes: usize,

    pub fail_open: Option<Failure>,
    pub fail_close: bool,
    pub fail_flush: bool,
    /// 1-based index of the write call that fails
    pub fail_write_at: Option<usize>,
}

impl FakeState {
    /// Total transport calls that touch the stream
    pub fn io_calls(&self) -> usize {
        self.opens.len() + self.closes + self.writes.len() + self.flushes
    }

    /// Every written byte, in order
    pub fn written(&self) -> Vec<u8> {
        self.writes.concat()
    }
}

/// Transport that records every call; clones share state
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Simulate the link dropping without the printer noticing
    pub fn drop_link(&self) {
        self.state().open = false;
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn open(&mut self, target: &str) -> Result<()> {
        let mut state = self.state();
        state.opens.push(target.to_string());
        if let Some(failure) = state.fail_open {
            return Err(failure.to_error());
        }
        state.open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let mut state = self.state();
        state.closes += 1;
        state.open = false;
        if state.fail_close {
            return Err(Failure::BrokenPipe.to_error());
        }
        Ok(())
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state();
        if !state.open {
            return Err(Error::NotConnected);
        }
        state.writes.push(data.to_vec());
        if state.fail_write_at == Some(state.writes.len()) {
            return Err(Failure::BrokenPipe.to_error());
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        let mut state = self.state();
        state.flushes += 1;
        if state.fail_flush {
            return Err(Error::WriteTimeout);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state().open
    }

    fn peer(&self) -> Option<String> {
        let state = self.state();
        if state.open { state.opens.last().cloned() } else { None }
    }

    fn kind(&self) -> &'static str {
        "fake"
    }
}
