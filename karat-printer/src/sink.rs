//! Transport capability injected by the caller
//!
//! The rendering core only ever sees this trait; Bluetooth, USB and network
//! implementations live with the application.

use crate::encoding::CodePage;
use crate::error::PrintResult;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// A byte-stream sink for finished receipts
#[allow(async_fn_in_trait)]
pub trait PrintSink {
    /// Write one complete, already-encoded receipt
    async fn write(&self, data: &[u8]) -> PrintResult<()>;

    /// Character table the device expects
    fn code_page(&self) -> CodePage {
        CodePage::Windows1252
    }
}

/// Sink that keeps everything in memory (previews, tests)
#[derive(Debug, Default)]
pub struct MemorySink {
    buf: Mutex<Vec<u8>>,
    code_page: CodePage,
}

impl MemorySink {
    pub fn new(code_page: CodePage) -> Self {
        Self {
            buf: Mutex::new(Vec::new()),
            code_page,
        }
    }

    /// Bytes written so far
    pub async fn contents(&self) -> Vec<u8> {
        self.buf.lock().await.clone()
    }

    /// Drain the collected bytes
    pub async fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.buf.lock().await)
    }
}

impl PrintSink for MemorySink {
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    async fn write(&self, data: &[u8]) -> PrintResult<()> {
        self.buf.lock().await.extend_from_slice(data);
        debug!("Buffered print job");
        Ok(())
    }

    fn code_page(&self) -> CodePage {
        self.code_page
    }
}
