//! Remote printer client
//!
//! [`Printer`] accumulates commands in call order and ships them to the
//! print service as one batch per [`flush`](Printer::flush).

use crate::command::{BarcodeOptions, Command, QrImageOptions, TableCell, TableOptions};
use crate::config::PrinterConfig;
use crate::error::{PrintError, PrintResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Reported when the service signals failure without a reason.
const FALLBACK_MESSAGE: &str = "unexpected error";

/// Outgoing flush payload: the queued commands in call order, terminated by
/// the `flush` marker.
#[derive(Serialize)]
struct FlushRequest<'a> {
    opts: &'a [Command],
}

/// Structured verdict from the print service.
#[derive(Debug, Deserialize)]
struct FlushResponse {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Client for a remote ESC/POS rendering service.
///
/// Builder methods append one command each and return `&mut Self` for
/// chaining. Arguments are forwarded as-is; the service validates them and
/// performs the actual rendering and device I/O. The target address is fixed
/// at construction; one instance can be flushed any number of times, each
/// flush an independent batch.
#[derive(Debug)]
pub struct Printer {
    address: String,
    client: reqwest::Client,
    queue: Vec<Command>,
}

impl Printer {
    /// Create a printer targeting the given service address.
    pub fn new(address: impl Into<String>) -> Self {
        PrinterConfig::new(address).build()
    }

    pub(crate) fn from_config(config: &PrinterConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            address: config.address.clone(),
            client,
            queue: Vec::new(),
        }
    }

    /// Service address this printer flushes to.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Number of commands queued since the last flush.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn push(&mut self, command: Command) -> &mut Self {
        self.queue.push(command);
        self
    }

    // === Printer Setup ===

    /// Set the printer model so the service can emit model-specific commands
    /// (e.g. "qsprinter").
    pub fn model(&mut self, model: impl Into<String>) -> &mut Self {
        self.push(Command::Model {
            model: Some(model.into()),
        })
    }

    /// Generic printer: no model-specific commands.
    pub fn model_generic(&mut self) -> &mut Self {
        self.push(Command::Model { model: None })
    }

    /// Select a character code table.
    pub fn character_code_table(&mut self, table: u8) -> &mut Self {
        self.push(Command::CharacterCodeTable { table })
    }

    /// Set the encoding applied to subsequent text commands.
    pub fn encode(&mut self, encoding: impl Into<String>) -> &mut Self {
        self.push(Command::Encode {
            encoding: encoding.into(),
        })
    }

    // === Margins ===

    pub fn margin_bottom(&mut self, size: u8) -> &mut Self {
        self.push(Command::MarginBottom { size })
    }

    pub fn margin_left(&mut self, size: u8) -> &mut Self {
        self.push(Command::MarginLeft { size })
    }

    pub fn margin_right(&mut self, size: u8) -> &mut Self {
        self.push(Command::MarginRight { size })
    }

    // === Text Output ===

    /// Print content as-is, without encoding conversion or end of line.
    pub fn print(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(Command::Content {
            content: content.into(),
        })
    }

    /// Print content followed by end of line.
    pub fn println(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(Command::Println {
            content: content.into(),
        })
    }

    /// Print an empty line.
    pub fn new_line(&mut self) -> &mut Self {
        self.push(Command::NewLine)
    }

    /// Print encoded text with end of line, using the service's default
    /// encoding.
    pub fn text(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(Command::Text {
            content: content.into(),
            encoding: None,
        })
    }

    /// Print encoded text with end of line, using an explicit encoding.
    pub fn text_with(
        &mut self,
        content: impl Into<String>,
        encoding: impl Into<String>,
    ) -> &mut Self {
        self.push(Command::Text {
            content: content.into(),
            encoding: Some(encoding.into()),
        })
    }

    /// Print encoded text without end of line.
    pub fn pure_text(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(Command::PureText {
            content: content.into(),
            encoding: None,
        })
    }

    /// Print encoded text without end of line, using an explicit encoding.
    pub fn pure_text_with(
        &mut self,
        content: impl Into<String>,
        encoding: impl Into<String>,
    ) -> &mut Self {
        self.push(Command::PureText {
            content: content.into(),
            encoding: Some(encoding.into()),
        })
    }

    /// Draw a separator line with the service's default character.
    pub fn draw_line(&mut self) -> &mut Self {
        self.push(Command::DrawLine { character: None })
    }

    /// Draw a separator line with the given character.
    pub fn draw_line_with(&mut self, character: char) -> &mut Self {
        self.push(Command::DrawLine {
            character: Some(character),
        })
    }

    // === Tables ===

    /// Print a table row of equally sized cells.
    pub fn table<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Command::Table {
            cells: cells.into_iter().map(Into::into).collect(),
            encoding: None,
        })
    }

    /// Print a table row of equally sized cells with an explicit encoding.
    pub fn table_with<I, S>(&mut self, cells: I, encoding: impl Into<String>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Command::Table {
            cells: cells.into_iter().map(Into::into).collect(),
            encoding: Some(encoding.into()),
        })
    }

    /// Print a table row with per-cell layout hints.
    pub fn table_custom(&mut self, rows: Vec<TableCell>) -> &mut Self {
        self.push(Command::TableCustom {
            rows,
            options: TableOptions::default(),
        })
    }

    /// Print a table row with per-cell layout hints and row options.
    pub fn table_custom_with(&mut self, rows: Vec<TableCell>, options: TableOptions) -> &mut Self {
        self.push(Command::TableCustom { rows, options })
    }

    // === Layout ===

    /// Feed n lines.
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.push(Command::Feed { lines })
    }

    /// Send a feed control sequence (e.g. "lf", "ff", "cr", "ht", "vt").
    pub fn control(&mut self, sequence: impl Into<String>) -> &mut Self {
        self.push(Command::Control {
            sequence: sequence.into(),
        })
    }

    /// Set text alignment (e.g. "lt", "ct", "rt").
    pub fn align(&mut self, alignment: impl Into<String>) -> &mut Self {
        self.push(Command::Align {
            alignment: alignment.into(),
        })
    }

    /// Select the font family (e.g. "a", "b").
    pub fn font(&mut self, family: impl Into<String>) -> &mut Self {
        self.push(Command::Font {
            family: family.into(),
        })
    }

    /// Set the font style (e.g. "b", "i", "u", "bu").
    pub fn style(&mut self, style: impl Into<String>) -> &mut Self {
        self.push(Command::Style {
            style: style.into(),
        })
    }

    /// Set the font size multipliers.
    pub fn size(&mut self, width: u8, height: u8) -> &mut Self {
        self.push(Command::Size { width, height })
    }

    /// Set character spacing.
    pub fn spacing(&mut self, chars: u8) -> &mut Self {
        self.push(Command::Spacing { chars: Some(chars) })
    }

    /// Restore the service's default character spacing.
    pub fn spacing_default(&mut self) -> &mut Self {
        self.push(Command::Spacing { chars: None })
    }

    /// Set line spacing.
    pub fn line_space(&mut self, dots: u8) -> &mut Self {
        self.push(Command::LineSpace { dots: Some(dots) })
    }

    /// Restore the service's default line spacing.
    pub fn line_space_default(&mut self) -> &mut Self {
        self.push(Command::LineSpace { dots: None })
    }

    // === Hardware ===

    /// Send a hardware control command (e.g. "init", "select", "reset").
    pub fn hardware(&mut self, command: impl Into<String>) -> &mut Self {
        self.push(Command::Hardware {
            command: command.into(),
        })
    }

    /// Send a pulse to kick the cash drawer on the given pin.
    pub fn cash_draw(&mut self, pin: u8) -> &mut Self {
        self.push(Command::CashDraw { pin })
    }

    /// Sound the buzzer `count` times for `duration` x 100 ms each.
    pub fn beep(&mut self, count: u8, duration: u8) -> &mut Self {
        self.push(Command::Beep { count, duration })
    }

    /// Cut the paper with the service's defaults.
    pub fn cut(&mut self) -> &mut Self {
        self.push(Command::Cut {
            partial: None,
            feed: None,
        })
    }

    /// Cut the paper, choosing partial cut and pre-cut feed.
    pub fn cut_with(&mut self, partial: bool, feed: u8) -> &mut Self {
        self.push(Command::Cut {
            partial: Some(partial),
            feed: Some(feed),
        })
    }

    // === Barcodes and Images ===

    /// Print a barcode (kind e.g. "EAN13", "CODE39").
    pub fn barcode(&mut self, code: impl Into<String>, kind: impl Into<String>) -> &mut Self {
        self.push(Command::Barcode {
            code: code.into(),
            kind: kind.into(),
            options: None,
        })
    }

    /// Print a barcode with rendering options.
    pub fn barcode_with(
        &mut self,
        code: impl Into<String>,
        kind: impl Into<String>,
        options: BarcodeOptions,
    ) -> &mut Self {
        self.push(Command::Barcode {
            code: code.into(),
            kind: kind.into(),
            options: Some(options),
        })
    }

    /// Print a QR code with the service's defaults.
    pub fn qrcode(&mut self, code: impl Into<String>) -> &mut Self {
        self.push(Command::QrCode {
            code: code.into(),
            version: None,
            level: None,
            size: None,
        })
    }

    /// Print a QR code with explicit version, error correction level and
    /// module size.
    pub fn qrcode_with(
        &mut self,
        code: impl Into<String>,
        version: u8,
        level: impl Into<String>,
        size: u8,
    ) -> &mut Self {
        self.push(Command::QrCode {
            code: code.into(),
            version: Some(version),
            level: Some(level.into()),
            size: Some(size),
        })
    }

    /// Print a QR code rendered as an image.
    pub fn qrimage(&mut self, content: impl Into<String>) -> &mut Self {
        self.push(Command::QrImage {
            content: content.into(),
            options: None,
        })
    }

    /// Print a QR code rendered as an image, with rendering options.
    pub fn qrimage_with(
        &mut self,
        content: impl Into<String>,
        options: QrImageOptions,
    ) -> &mut Self {
        self.push(Command::QrImage {
            content: content.into(),
            options: Some(options),
        })
    }

    /// Print an image; the service handles decoding and dithering.
    pub fn image(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.push(Command::Image {
            data: data.into(),
            density: None,
        })
    }

    /// Print an image with an explicit density (e.g. "d24").
    pub fn image_with(&mut self, data: impl Into<Vec<u8>>, density: impl Into<String>) -> &mut Self {
        self.push(Command::Image {
            data: data.into(),
            density: Some(density.into()),
        })
    }

    /// Print a raster image.
    pub fn raster(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.push(Command::Raster {
            data: data.into(),
            mode: None,
        })
    }

    /// Print a raster image with an explicit mode (e.g. "dhdw").
    pub fn raster_with(&mut self, data: impl Into<Vec<u8>>, mode: impl Into<String>) -> &mut Self {
        self.push(Command::Raster {
            data: data.into(),
            mode: Some(mode.into()),
        })
    }

    // === Color ===

    /// Select the print color: 0 primary (black), 1 secondary (red).
    pub fn color(&mut self, color: u8) -> &mut Self {
        self.push(Command::Color { color })
    }

    /// Toggle reverse (white-on-black) printing.
    pub fn reverse_colors(&mut self, enabled: bool) -> &mut Self {
        self.push(Command::ReverseColors { enabled })
    }

    // === Raw ===

    /// Queue a low-level command for the printer buffer.
    pub fn raw(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.push(Command::Raw { data: data.into() })
    }

    // === Flush ===

    /// Take the queued commands for transmission.
    ///
    /// Appends the terminal `flush` marker and swaps in a fresh queue before
    /// any suspension point, so commands issued while a request is in flight
    /// start a new batch.
    fn take_batch(&mut self) -> Vec<Command> {
        self.queue.push(Command::Flush);
        std::mem::take(&mut self.queue)
    }

    /// Send all queued commands to the service as one batch.
    ///
    /// The queue is detached before the request goes out and is not restored
    /// on failure; retrying means re-issuing the builder calls. Fails with
    /// [`PrintError::Rejected`] when the service reports it could not execute
    /// the batch, and with a transport-class error when the round trip itself
    /// fails.
    #[instrument(skip(self), fields(address = %self.address))]
    pub async fn flush(&mut self) -> PrintResult<&mut Self> {
        let batch = self.take_batch();
        debug!(commands = batch.len(), "sending print batch");

        let response = self
            .client
            .post(&self.address)
            .json(&FlushRequest { opts: &batch })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PrintError::Status { status, body });
        }

        let verdict: FlushResponse = response
            .json()
            .await
            .map_err(|e| PrintError::InvalidResponse(e.to_string()))?;

        if verdict.error {
            let message = verdict
                .message
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
            return Err(PrintError::Rejected(message));
        }

        info!(commands = batch.len(), "print batch accepted");
        Ok(self)
    }

    /// Synonym for [`flush`](Self::flush); the printer holds no connection
    /// to release.
    pub async fn close(&mut self) -> PrintResult<&mut Self> {
        self.flush().await
    }
}
