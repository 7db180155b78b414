mod common;

use common::*;
use karat_printer::{CodePage, PrintError, PrintResult, PrintSink, encode_stream};
use karat_receipt::{MemorySink, OutputFormat, ReceiptComposer, RenderError};
use shared::models::EstimationItem;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Sink whose printer is always unreachable
#[derive(Default)]
struct OfflineSink {
    attempts: AtomicUsize,
}

impl PrintSink for OfflineSink {
    async fn write(&self, _data: &[u8]) -> PrintResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PrintError::Offline)
    }
}

#[tokio::test]
async fn test_failed_transport_then_retry_on_other_sink() {
    init_tracing();
    let mut payload = payload_with_paper("80mm");
    payload.items = vec![ring()];
    payload.advances = vec![advance("ADV-2", "1000")];
    let composer = ReceiptComposer::new(&payload);

    let offline = OfflineSink::default();
    let err = composer
        .print(&offline, OutputFormat::Thermal)
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::Transport(PrintError::Offline)));
    assert_eq!(offline.attempts.load(Ordering::SeqCst), 1);

    let sink = MemorySink::default();
    let written = composer.print(&sink, OutputFormat::Thermal).await.unwrap();
    let bytes = sink.contents().await;
    assert_eq!(written, bytes.len());

    let expected = encode_stream(&composer.render_thermal().unwrap(), CodePage::Windows1252);
    assert_eq!(bytes, expected);
}

#[tokio::test]
async fn test_fallback_to_html_pipeline() {
    let mut payload = payload_with_paper("112mm");
    payload.purchases = vec![old_gold()];
    let composer = ReceiptComposer::new(&payload);

    let sink = MemorySink::new(CodePage::Utf8);
    composer.print(&sink, OutputFormat::Html).await.unwrap();

    let html = String::from_utf8(sink.take().await).unwrap();
    assert_eq!(html, composer.render_html().unwrap());
    assert!(html.contains("PURCHASE VOUCHER"));
}

#[tokio::test]
async fn test_render_failure_writes_nothing() {
    let mut payload = payload_with_paper("A4");
    payload.items = vec![ring()];

    let sink = MemorySink::default();
    let err = ReceiptComposer::new(&payload)
        .print(&sink, OutputFormat::Thermal)
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedPaperWidth { .. }));
    assert!(sink.contents().await.is_empty());
}

#[tokio::test]
async fn test_thermal_bytes_use_sink_code_page() {
    let mut payload = payload_with_paper("80mm");
    payload.items = vec![EstimationItem {
        name: "Café ₹ Ring".to_string(),
        ..ring()
    }];
    let composer = ReceiptComposer::new(&payload);

    let sink = MemorySink::new(CodePage::Windows1252);
    composer.print(&sink, OutputFormat::Thermal).await.unwrap();
    let bytes = sink.take().await;

    assert!(bytes.starts_with(&[0x1B, 0x40]));
    assert!(bytes.windows(4).any(|w| w == [b'C', b'a', b'f', 0xE9]));
    assert!(bytes.windows(8).any(|w| w == b"Caf\xE9 Rs.".as_slice()));
}

#[tokio::test]
async fn test_unmerged_print_writes_all_slips_once() {
    let mut payload = payload_with_paper("58mm");
    payload.chits = vec![chit("CH-1", "500")];
    payload.advances = vec![advance("A-1", "700")];
    payload.config.merge_print = false;
    let composer = ReceiptComposer::new(&payload);

    let sink = MemorySink::new(CodePage::Utf8);
    composer.print(&sink, OutputFormat::Thermal).await.unwrap();
    let stream = String::from_utf8(sink.take().await).unwrap();

    let slips = composer.render_thermal_slips().unwrap();
    assert_eq!(slips.len(), 2);
    assert_eq!(stream, slips.concat());
    assert_eq!(stream.matches("\x1B\x40").count(), 2);
}

#[tokio::test]
async fn test_concurrent_renders_are_independent() {
    let mut first = payload_with_paper("80mm");
    first.items = vec![ring()];
    let mut second = payload_with_paper("58mm");
    second.chits = vec![chit("CH-8", "900")];

    let (a, b) = tokio::join!(
        async {
            let sink = MemorySink::new(CodePage::Utf8);
            ReceiptComposer::new(&first)
                .print(&sink, OutputFormat::Thermal)
                .await
                .unwrap();
            sink.take().await
        },
        async {
            let sink = MemorySink::new(CodePage::Utf8);
            ReceiptComposer::new(&second)
                .print(&sink, OutputFormat::Thermal)
                .await
                .unwrap();
            sink.take().await
        }
    );

    assert_eq!(a, ReceiptComposer::new(&first).render_thermal().unwrap().into_bytes());
    assert_eq!(b, ReceiptComposer::new(&second).render_thermal().unwrap().into_bytes());
}
