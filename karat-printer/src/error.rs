//! Transport errors reported by print sinks

use std::time::Duration;
use thiserror::Error;

/// Failure while handing a finished receipt to a printer
///
/// Raised by `PrintSink` implementations. The rendering core never creates
/// these itself; it only forwards them.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Could not connect to printer: {0}")]
    Connection(String),

    #[error("Printer I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Paired device is switched off, out of paper or out of range
    #[error("Printer is offline")]
    Offline,

    #[error("Printer did not respond within {0:?}")]
    Timeout(Duration),

    /// Device or spooler refused the job
    #[error("Print job rejected: {0}")]
    Rejected(String),
}

pub type PrintResult<T> = Result<T, PrintError>;
