//! Printer client configuration

use crate::printer::Printer;

/// Configuration for connecting to the print service
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// Service endpoint URL (e.g., "http://localhost:3000")
    pub address: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl PrinterConfig {
    /// Create a new configuration with the default timeout
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create a printer from this configuration
    pub fn build(&self) -> Printer {
        Printer::from_config(self)
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
