//! High-level printer interface

use bytes::{BufMut, BytesMut};
use image::RgbImage;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use thermoprint_core::{encoder, Session};
use thermoprint_transport::{TcpTransport, Transport};
use thermoprint_types::{
    BarcodeOptions, DeviceInfo, ImageOptions, PrintOptions, QrOptions, Symbology,
};

use crate::{
    config::PrinterConfig,
    error::{Error, Result},
    event::PrinterEvent,
};

/// Thermal receipt printer
///
/// Owns one transport and tracks whether it is usable. Every print
/// operation checks connectivity, encodes the request and performs a
/// single write followed by a flush. A failed write closes the transport
/// and leaves the printer disconnected; nothing is retried.
///
/// All mutating methods take `&mut self`, so writes to one printer never
/// interleave. Share a printer between tasks by wrapping it in a
/// `tokio::sync::Mutex`.
///
/// # Examples
///
/// ```no_run
/// use thermoprint::{Alignment, Printer, PrintOptions};
///
/// #[tokio::main]
/// async fn main() -> thermoprint::Result<()> {
///     let mut printer = Printer::new();
///     printer.connect("192.168.1.50:9100").await?;
///
///     let title = PrintOptions::new().with_align(Alignment::Center).with_bold(true);
///     printer.print_text("RECEIPT", &title).await?;
///     printer.cut().await?;
///
///     printer.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Printer {
    transport: Box<dyn Transport>,
    session: Session,
    config: PrinterConfig,
    events: broadcast::Sender<PrinterEvent>,
    name: Option<String>,
    target: Option<String>,
}

impl Printer {
    /// Create a printer using TCP transport
    pub fn new() -> Self {
        Self::with_transport(TcpTransport::new())
    }

    /// Create a printer on top of an arbitrary transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        let config = PrinterConfig::default();
        let (events, _) = broadcast::channel(config.event_capacity);

        Self {
            transport: Box::new(transport),
            session: Session::new(),
            config,
            events,
            name: None,
            target: None,
        }
    }

    /// Replace the configuration
    ///
    /// Existing event subscribers are detached when the capacity changes.
    pub fn with_config(mut self, config: PrinterConfig) -> Result<Self> {
        config.validate()?;

        if config.event_capacity != self.config.event_capacity {
            let (events, _) = broadcast::channel(config.event_capacity);
            self.events = events;
        }

        self.config = config;
        Ok(self)
    }

    /// Set a display name reported by [`Printer::status`]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// Subscribe to lifecycle events
    ///
    /// A slow subscriber loses the oldest events; it never stalls the
    /// printer.
    pub fn subscribe(&self) -> broadcast::Receiver<PrinterEvent> {
        self.events.subscribe()
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.session.is_connected() && self.transport.is_open()
    }

    /// Describe the printer and its connection
    pub fn status(&self) -> DeviceInfo {
        let address = self
            .session
            .peer()
            .or_else(|| self.target.clone())
            .unwrap_or_default();

        let connected_at = if self.is_connected() {
            self.session.connected_at()
        } else {
            None
        };

        DeviceInfo::new(address, self.transport.kind())
            .with_name(self.name.clone())
            .with_connection(connected_at)
    }

    /// Connect to the printer at `target`
    ///
    /// An open transport is closed first; errors from that close are
    /// ignored. On success the printer is initialized (`ESC @`).
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The target cannot be resolved (`DeviceNotFound`)
    /// - Access is refused (`PermissionDenied`)
    /// - The transport is down (`TransportUnavailable`)
    /// - Opening or initializing fails otherwise (`ConnectionFailed`)
    pub async fn connect(&mut self, target: &str) -> Result<()> {
        info!("Connecting to {}...", target);

        if self.transport.is_open() || self.session.is_connected() {
            debug!("Closing previous connection to {:?}", self.target);
            if let Err(e) = self.transport.close().await {
                debug!("Ignoring close error before reconnect: {}", e);
            }
        }
        self.session.close();
        self.target = Some(target.to_string());

        if let Err(e) = self.open_and_init(target).await {
            warn!("Connection to {} failed: {}", target, e);
            self.drop_connection(target, e.to_string()).await;
            return Err(Error::from_connect(e));
        }

        let peer = self.transport.peer().unwrap_or_else(|| target.to_string());
        if let Err(e) = self.session.open(peer) {
            self.drop_connection(target, e.to_string()).await;
            return Err(Error::ConnectionFailed {
                message: e.to_string(),
                source: None,
            });
        }

        info!("Connected to {} via {}", target, self.transport.kind());
        self.emit(PrinterEvent::connected(target));

        Ok(())
    }

    async fn open_and_init(&mut self, target: &str) -> thermoprint_transport::Result<()> {
        self.transport.open(target).await?;
        self.transport.write(&encoder::encode_init()).await?;
        self.transport.flush().await
    }

    /// Disconnect from the printer
    ///
    /// Disconnecting a printer that is not connected is a no-op. The printer
    /// is disconnected afterwards even when closing the transport fails.
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.transport.is_open() && !self.session.is_connected() {
            debug!("Already disconnected");
            return Ok(());
        }

        let target = self.current_target();
        info!("Disconnecting from {}...", target);

        let result = self.transport.close().await;
        self.session.close();
        self.emit(PrinterEvent::disconnected(target));

        match result {
            Ok(()) => {
                info!("Disconnected");
                Ok(())
            }
            Err(e) => {
                warn!("Error while closing transport: {}", e);
                Err(Error::DisconnectionFailed {
                    message: e.to_string(),
                    source: Some(e),
                })
            }
        }
    }

    /// Print a line of text
    ///
    /// Formatting, text and a line feed go out in one write; formatting is
    /// then reset in a second write. A failed reset fails the call even
    /// though the text was delivered.
    pub async fn print_text(&mut self, text: &str, options: &PrintOptions) -> Result<()> {
        self.ensure_connected()?;

        if text.is_empty() {
            return Err(Error::invalid_parameter("text must not be empty"));
        }

        let formatting = encoder::encode_text_formatting(options);
        let line = encoder::encode_text(text);

        let mut buf = BytesMut::with_capacity(formatting.len() + line.len());
        buf.put_slice(&formatting);
        buf.put_slice(&line);
        self.write(&buf).await?;

        let mut reset = BytesMut::from(&encoder::encode_reset_formatting()[..]);
        reset.put_slice(&encoder::encode_clear_effects(options));
        self.write(&reset).await
    }

    /// Print a decoded RGB image
    ///
    /// The image is scaled to `options.width` dots, or the configured dot
    /// width when unset. An explicit width must lie in
    /// [`PrinterConfig::DOT_WIDTH_RANGE`].
    pub async fn print_image(&mut self, image: &RgbImage, options: &ImageOptions) -> Result<()> {
        self.ensure_connected()?;

        if let Some(width) = options.width {
            if !PrinterConfig::DOT_WIDTH_RANGE.contains(&width) {
                return Err(Error::invalid_parameter(format!(
                    "image width {} out of range {:?}",
                    width,
                    PrinterConfig::DOT_WIDTH_RANGE
                )));
            }
        }

        let bytes = encoder::encode_image(image, options, self.config.dot_width)?;
        debug!("Encoded image: {} bytes", bytes.len());

        self.write(&bytes).await
    }

    pub async fn print_qr(&mut self, data: &str, options: &QrOptions) -> Result<()> {
        self.ensure_connected()?;

        let bytes = encoder::encode_qr(data, options)?;
        self.write(&bytes).await
    }

    /// Print a barcode
    ///
    /// Symbology names from user input go through `str::parse`, which
    /// fails with an error converting to [`Error::UnsupportedType`].
    pub async fn print_barcode(
        &mut self,
        data: &str,
        symbology: Symbology,
        options: &BarcodeOptions,
    ) -> Result<()> {
        self.ensure_connected()?;

        let bytes = encoder::encode_barcode(data, symbology, options)?;
        self.write(&bytes).await
    }

    /// Cut the paper
    pub async fn cut(&mut self) -> Result<()> {
        self.ensure_connected()?;
        self.write(&encoder::encode_cut()).await
    }

    /// Pulse the cash drawer
    pub async fn open_cash_drawer(&mut self) -> Result<()> {
        self.ensure_connected()?;
        self.write(&encoder::encode_cash_drawer_kick()).await
    }

    /// Send raw bytes unchanged
    pub async fn print_raw(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_connected()?;

        if data.is_empty() {
            return Err(Error::invalid_parameter("raw data must not be empty"));
        }

        self.write(&encoder::encode_raw(data)).await
    }

    /// Set the character size for following text from a point size
    pub async fn set_font_size(&mut self, points: u32) -> Result<()> {
        self.ensure_connected()?;
        self.write(&encoder::encode_font_size(points)).await
    }

    /// Restore default alignment, emphasis and size
    pub async fn reset_font_settings(&mut self) -> Result<()> {
        self.ensure_connected()?;
        self.write(&encoder::encode_reset_formatting()).await
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.session.is_connected() {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    /// Write and flush `data`, closing the connection on failure
    async fn write(&mut self, data: &[u8]) -> Result<()> {
        if !self.session.is_connected() {
            return Err(Error::NotConnected);
        }

        if !self.transport.is_open() {
            let target = self.current_target();
            warn!("Transport to {} closed underneath the session", target);
            self.session.close();
            self.emit(PrinterEvent::connection_lost(target, "transport closed"));
            return Err(Error::NotConnected);
        }

        trace!(
            "Sending {} bytes: {}",
            data.len(),
            hex::encode(&data[..data.len().min(32)])
        );

        let result = match self.transport.write(data).await {
            Ok(()) => self.transport.flush().await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            let target = self.current_target();
            warn!("Write to {} failed: {}", target, e);
            self.drop_connection(&target, e.to_string()).await;
            return Err(Error::PrintFailed {
                message: e.to_string(),
                source: Some(e),
            });
        }

        Ok(())
    }

    /// Best-effort close, mark disconnected and report the loss
    async fn drop_connection(&mut self, target: &str, error: String) {
        if let Err(e) = self.transport.close().await {
            debug!("Ignoring close error after failure: {}", e);
        }
        self.session.close();
        self.emit(PrinterEvent::connection_lost(target, error));
    }

    fn current_target(&self) -> String {
        self.target
            .clone()
            .or_else(|| self.session.peer())
            .unwrap_or_default()
    }

    fn emit(&self, event: PrinterEvent) {
        if !self.config.enable_events {
            return;
        }

        trace!("Event: {}", event);

        // No subscribers is not an error
        let _ = self.events.send(event);
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Printer {
    fn drop(&mut self) {
        if self.session.is_connected() {
            warn!("Printer dropped while connected to {}", self.current_target());
        }
    }
}
