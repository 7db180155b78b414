//! Karat Receipt - estimation receipt rendering
//!
//! Turns an assembled `ReceiptPayload` into either an ESC/POS text stream
//! for thermal printers or a standalone HTML document for the system print
//! pipeline. Both come from one `Document`, so they always agree on sections
//! and figures.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  ReceiptComposer                                 │
//! │  - section flags + title                         │
//! │  - TotalsCalculator / LayoutPolicy (once)        │
//! ├──────────────────────────────────────────────────┤
//! │  ReceiptBuilder  → Document (section/block/row)  │
//! ├────────────────────────┬─────────────────────────┤
//! │  ThermalRenderer       │  HtmlRenderer           │
//! │  (EscPosTextBuilder)   │  (embedded CSS)         │
//! └────────────────────────┴─────────────────────────┘
//!                 │
//!                 ▼ PrintSink (injected)
//! ```
//!
//! # Example
//!
//! ```
//! use karat_receipt::ReceiptComposer;
//! use shared::models::{EstimationItem, MakingChargeType, ReceiptPayload};
//!
//! let payload = ReceiptPayload {
//!     items: vec![EstimationItem {
//!         name: "Ring".into(),
//!         gross_weight: "5".parse().unwrap(),
//!         rate: "6000".parse().unwrap(),
//!         wastage: "2".parse().unwrap(),
//!         making_charge: "500".parse().unwrap(),
//!         making_charge_type: MakingChargeType::Fixed,
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let preview = ReceiptComposer::new(&payload).render_preview().unwrap();
//! assert!(preview.preview_text.contains("ESTIMATION SLIP"));
//! assert!(preview.html.contains(r#"data-net-payable="32033""#));
//! ```

mod builder;
pub mod composer;
pub mod document;
pub mod error;
pub mod format;
pub mod html;
pub mod layout;
pub mod thermal;
pub mod totals;
pub mod tracking;

pub use composer::{
    Category, OutputFormat, PreparedReceipt, ReceiptComposer, ReceiptPreview, ReceiptTitle,
    SectionFlags,
};
pub use document::{Block, Document, DocumentVisitor, Section, SectionKind};
pub use error::{RenderError, RenderResult};
pub use html::HtmlRenderer;
pub use layout::{ItemLayout, Layout, LayoutPolicy, WidthClass};
pub use thermal::ThermalRenderer;
pub use totals::{ItemValuation, PurchaseValuation, Totals, TotalsCalculator};
pub use tracking::{DEFAULT_QR_SERVICE, render_tracking_label, tracking_qr_url};

// Re-export for convenience
pub use karat_printer::{MemorySink, PrintError, PrintSink, strip_control_sequences};
