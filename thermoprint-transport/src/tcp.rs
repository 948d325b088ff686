//! TCP transport for network printers
//!
//! Network receipt printers accept raw ESC/POS on port 9100
//! ("JetDirect"/raw printing). There is no framing: bytes written to the
//! socket are fed straight to the printer's command parser.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use crate::{error::*, Transport};

/// Default raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// TCP transport for raw network printers
pub struct TcpTransport {
    stream: Option<TcpStream>,
    peer: Option<SocketAddr>,
    connect_timeout: Duration,
    write_timeout: Duration,
}

impl TcpTransport {
    /// Create new, closed TCP transport
    pub fn new() -> Self {
        Self {
            stream: None,
            peer: None,
            connect_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(5),
        }
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set write timeout (applies to each write and flush)
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Resolve `target` to a socket address
    async fn resolve_addr(target: &str) -> Result<SocketAddr> {
        let (host, port) = parse_target(target)?;

        let mut addrs = tokio::net::lookup_host((host.as_str(), port))
            .await
            .map_err(|e| Error::DeviceNotFound(format!("{}: {}", target, e)))?;

        addrs
            .next()
            .ok_or_else(|| Error::DeviceNotFound(format!("No addresses found for {}", target)))
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `host[:port]` into host and port, defaulting to [`DEFAULT_PORT`]
///
/// Bare IPv6 addresses are accepted; an IPv6 address with a port must be
/// bracketed (`[::1]:9100`).
pub fn parse_target(target: &str) -> Result<(String, u16)> {
    let target = target.trim();

    if target.is_empty() {
        return Err(Error::InvalidAddress("empty target".into()));
    }

    if let Ok(addr) = target.parse::<SocketAddr>() {
        return Ok((addr.ip().to_string(), addr.port()));
    }

    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok((ip.to_string(), DEFAULT_PORT));
    }

    match target.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| Error::InvalidAddress(format!("invalid port in {}", target)))?;
            if host.is_empty() {
                return Err(Error::InvalidAddress(format!("missing host in {}", target)));
            }
            Ok((host.to_string(), port))
        }
        None => Ok((target.to_string(), DEFAULT_PORT)),
    }
}

/// Map a socket connect failure onto the transport taxonomy
fn connect_error(target: &str, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::PermissionDenied => {
            Error::PermissionDenied(format!("{}: {}", target, err))
        }
        io::ErrorKind::HostUnreachable => {
            Error::DeviceNotFound(format!("{}: {}", target, err))
        }
        io::ErrorKind::NetworkUnreachable | io::ErrorKind::NetworkDown => {
            Error::Unavailable(format!("{}: {}", target, err))
        }
        _ => Error::Io(err),
    }
}

/// Map a write or flush failure; a peer that went away is `ConnectionClosed`
fn stream_error(err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::BrokenPipe
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::WriteZero => Error::ConnectionClosed,
        _ => Error::Io(err),
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn open(&mut self, target: &str) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!("Dropping previous connection to {:?}", self.peer);
            let _ = stream.shutdown().await;
            self.peer = None;
        }

        let addr = Self::resolve_addr(target).await?;

        debug!("Connecting to {}...", addr);

        let stream = timeout(self.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| Error::ConnectionTimeout)?
            .map_err(|e| connect_error(target, e))?;

        // Small command bursts must not wait for Nagle coalescing
        stream.set_nodelay(true)?;

        debug!("Connected to {}", addr);

        self.stream = Some(stream);
        self.peer = Some(addr);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let peer = self.peer.take();

        if let Some(mut stream) = self.stream.take() {
            debug!("Closing connection to {:?}...", peer);

            match stream.shutdown().await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
                Err(e) => return Err(Error::Io(e)),
            }
        }

        Ok(())
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        trace!(
            "Writing {} bytes: {}",
            data.len(),
            hex::encode(&data[..data.len().min(32)])
        );

        timeout(self.write_timeout, stream.write_all(data))
            .await
            .map_err(|_| Error::WriteTimeout)?
            .map_err(stream_error)?;

        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        timeout(self.write_timeout, stream.flush())
            .await
            .map_err(|_| Error::WriteTimeout)?
            .map_err(stream_error)?;

        Ok(())
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn peer(&self) -> Option<String> {
        self.peer.map(|addr| addr.to_string())
    }

    fn kind(&self) -> &'static str {
        "tcp"
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if self.is_open() {
            warn!("TCP transport dropped while still open");
        }
    }
}
