//! # roach-client
//!
//! Client for the Roach remote receipt printing service.
//!
//! ## Scope
//!
//! This crate handles WHAT to send, not HOW to print:
//! - Chainable accumulation of printer operations (text, tables, barcodes,
//!   images, cash drawer, raw bytes, ...)
//! - One-batch-per-flush transmission over HTTP
//! - Success/failure surfacing from the service's structured verdict
//!
//! ESC/POS encoding, layout math and device I/O are owned by the remote
//! service. Arguments are forwarded untouched and never validated locally,
//! so a new server-side capability only needs a pass-through method here.
//!
//! ## Example
//!
//! ```ignore
//! use roach_client::Printer;
//!
//! let mut printer = Printer::new("http://localhost:3000");
//! printer
//!     .font("a")
//!     .align("ct")
//!     .text("The quick brown fox jumps over the lazy dog")
//!     .feed(2)
//!     .cut();
//! printer.flush().await?;
//! ```

mod command;
mod config;
mod error;
mod printer;

// Re-exports
pub use command::{BarcodeOptions, Command, QrImageOptions, TableCell, TableOptions, Value};
pub use config::PrinterConfig;
pub use error::{PrintError, PrintResult};
pub use printer::Printer;
