//! Receipt composer
//!
//! Decides section presence and the title, computes totals and the layout
//! once, and drives the renderers from that single prepared receipt.

use crate::builder::ReceiptBuilder;
use crate::document::Document;
use crate::error::RenderResult;
use crate::html::HtmlRenderer;
use crate::layout::{Layout, LayoutPolicy};
use crate::thermal::ThermalRenderer;
use crate::totals::{Totals, TotalsCalculator};
use karat_printer::{PrintSink, encode_stream, strip_control_sequences};
use serde::Serialize;
use shared::models::ReceiptPayload;
use tracing::{debug, error, instrument};

/// Which category collections are non-empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionFlags {
    pub items: bool,
    pub purchases: bool,
    pub chits: bool,
    pub advances: bool,
}

impl SectionFlags {
    pub fn from_payload(payload: &ReceiptPayload) -> Self {
        Self {
            items: !payload.items.is_empty(),
            purchases: !payload.purchases.is_empty(),
            chits: !payload.chits.is_empty(),
            advances: !payload.advances.is_empty(),
        }
    }

    /// Number of non-empty categories
    pub fn count(&self) -> usize {
        [self.items, self.purchases, self.chits, self.advances]
            .into_iter()
            .filter(|present| *present)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Present categories in print order
    pub fn categories(&self) -> Vec<Category> {
        let mut out = Vec::with_capacity(4);
        if self.items {
            out.push(Category::Items);
        }
        if self.purchases {
            out.push(Category::Purchases);
        }
        if self.chits {
            out.push(Category::Chits);
        }
        if self.advances {
            out.push(Category::Advances);
        }
        out
    }
}

/// A receipt category with its own collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Items,
    Purchases,
    Chits,
    Advances,
}

/// Receipt title, the printed signal of receipt intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptTitle {
    EstimationSlip,
    PurchaseVoucher,
    ChitReceipt,
    AdvanceReceipt,
    Receipt,
}

impl ReceiptTitle {
    /// Items anywhere → estimation slip; exactly one deduction category →
    /// its own title; otherwise the generic receipt.
    pub fn select(flags: SectionFlags) -> Self {
        if flags.items {
            return ReceiptTitle::EstimationSlip;
        }
        match (flags.purchases, flags.chits, flags.advances) {
            (true, false, false) => ReceiptTitle::PurchaseVoucher,
            (false, true, false) => ReceiptTitle::ChitReceipt,
            (false, false, true) => ReceiptTitle::AdvanceReceipt,
            _ => ReceiptTitle::Receipt,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReceiptTitle::EstimationSlip => "ESTIMATION SLIP",
            ReceiptTitle::PurchaseVoucher => "PURCHASE VOUCHER",
            ReceiptTitle::ChitReceipt => "CHIT RECEIPT",
            ReceiptTitle::AdvanceReceipt => "ADVANCE RECEIPT",
            ReceiptTitle::Receipt => "RECEIPT",
        }
    }
}

/// Output encoding for `ReceiptComposer::print`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// ESC/POS stream encoded for the sink's code page
    Thermal,
    /// UTF-8 HTML for the system print pipeline
    Html,
}

/// Everything computed for one render, before any encoding
#[derive(Debug, Clone)]
pub struct PreparedReceipt {
    pub flags: SectionFlags,
    pub title: ReceiptTitle,
    pub totals: Totals,
    pub layout: Layout,
    pub document: Document,
}

/// Both encodings of the same receipt
#[derive(Debug, Clone)]
pub struct ReceiptPreview {
    pub thermal: String,
    pub html: String,
    /// Thermal stream with control sequences removed, for on-screen display
    pub preview_text: String,
    pub totals: Totals,
}

/// Drives the renderers for one payload
pub struct ReceiptComposer<'a> {
    payload: &'a ReceiptPayload,
}

impl<'a> ReceiptComposer<'a> {
    pub fn new(payload: &'a ReceiptPayload) -> Self {
        Self { payload }
    }

    /// Compute totals and layout and build the document
    ///
    /// Fails before anything is rendered when the paper width is unknown.
    #[instrument(skip(self), fields(paper_width = %self.payload.config.paper_width))]
    pub fn prepare(&self) -> RenderResult<PreparedReceipt> {
        Self::prepare_payload(self.payload)
    }

    fn prepare_payload(payload: &ReceiptPayload) -> RenderResult<PreparedReceipt> {
        let layout = LayoutPolicy::width_class(&payload.config.paper_width)?;
        let flags = SectionFlags::from_payload(payload);
        let title = ReceiptTitle::select(flags);

        let calculator = TotalsCalculator::from_config(&payload.config);
        let totals = calculator.compute(
            &payload.items,
            &payload.purchases,
            &payload.chits,
            &payload.advances,
        );
        let document = ReceiptBuilder::new(payload, calculator, &totals, layout).build(title.as_str());

        debug!(
            ?flags,
            title = title.as_str(),
            sections = document.sections.len(),
            "Receipt prepared"
        );

        Ok(PreparedReceipt {
            flags,
            title,
            totals,
            layout,
            document,
        })
    }

    /// Render the ESC/POS stream (all sections on one slip)
    #[instrument(skip(self))]
    pub fn render_thermal(&self) -> RenderResult<String> {
        let prepared = self.prepare()?;
        let stream = ThermalRenderer::render(&prepared.document);
        debug!(len = stream.len(), "Thermal stream rendered");
        Ok(stream)
    }

    /// Render the standalone HTML document
    #[instrument(skip(self))]
    pub fn render_html(&self) -> RenderResult<String> {
        let prepared = self.prepare()?;
        let html = HtmlRenderer::render(&prepared.document);
        debug!(len = html.len(), "HTML document rendered");
        Ok(html)
    }

    /// Render both encodings from one prepared receipt
    #[instrument(skip(self))]
    pub fn render_preview(&self) -> RenderResult<ReceiptPreview> {
        let prepared = self.prepare()?;
        let thermal = ThermalRenderer::render(&prepared.document);
        let html = HtmlRenderer::render(&prepared.document);
        let preview_text = strip_control_sequences(&thermal);

        Ok(ReceiptPreview {
            thermal,
            html,
            preview_text,
            totals: prepared.totals,
        })
    }

    /// Thermal slips honoring `merge_print`
    ///
    /// Merged: a single slip. Unmerged: one slip per non-empty category,
    /// each with its own totals and title.
    #[instrument(skip(self), fields(merge_print = self.payload.config.merge_print))]
    pub fn render_thermal_slips(&self) -> RenderResult<Vec<String>> {
        let flags = SectionFlags::from_payload(self.payload);
        if self.payload.config.merge_print || flags.count() <= 1 {
            return Ok(vec![self.render_thermal()?]);
        }

        // Prepare every slip before rendering any
        let prepared = flags
            .categories()
            .into_iter()
            .map(|category| Self::prepare_payload(&self.payload_for(category)))
            .collect::<RenderResult<Vec<_>>>()?;

        let slips: Vec<String> = prepared
            .iter()
            .map(|p| ThermalRenderer::render(&p.document))
            .collect();
        debug!(slips = slips.len(), "Thermal slips rendered");
        Ok(slips)
    }

    /// Payload restricted to a single category
    fn payload_for(&self, category: Category) -> ReceiptPayload {
        let source = self.payload;
        let mut payload = ReceiptPayload {
            items: Vec::new(),
            purchases: Vec::new(),
            chits: Vec::new(),
            advances: Vec::new(),
            ..source.clone()
        };
        match category {
            Category::Items => payload.items = source.items.clone(),
            Category::Purchases => payload.purchases = source.purchases.clone(),
            Category::Chits => payload.chits = source.chits.clone(),
            Category::Advances => payload.advances = source.advances.clone(),
        }
        payload
    }

    /// Render completely, then hand the bytes to the sink in one write
    ///
    /// Nothing reaches the sink when rendering fails. On transport failure
    /// the payload is untouched and can be printed again to another sink.
    #[instrument(skip(self, sink))]
    pub async fn print<S: PrintSink>(&self, sink: &S, format: OutputFormat) -> RenderResult<usize> {
        let bytes = match format {
            OutputFormat::Thermal => {
                let stream = self.render_thermal_slips()?.concat();
                encode_stream(&stream, sink.code_page())
            }
            OutputFormat::Html => self.render_html()?.into_bytes(),
        };

        if let Err(e) = sink.write(&bytes).await {
            error!(error = %e, bytes = bytes.len(), "Receipt transport failed");
            return Err(e.into());
        }

        debug!(bytes = bytes.len(), "Receipt sent to sink");
        Ok(bytes.len())
    }
}
