//! Receipt display policy

use crate::util::lenient_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How wastage / making-charge cells are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeDisplay {
    /// The configured input, e.g. `2%`, `0.250g`, `450/g`
    #[default]
    Rate,
    /// The computed rupee value
    #[serde(alias = "amount")]
    Value,
}

/// User-configurable receipt toggles
///
/// Read-only for the renderers. Every field has a default so callers may
/// send any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    pub show_header: bool,
    pub show_footer: bool,
    pub show_operator: bool,
    pub show_customer: bool,
    pub show_gst: bool,
    pub show_wastage: bool,
    pub show_making_charge: bool,
    pub show_device_name: bool,
    pub wastage_display: ChargeDisplay,
    pub making_charge_display: ChargeDisplay,
    /// Raw paper width as configured on the device ("58mm", "80mm", "112mm")
    pub paper_width: String,
    /// Print all sections on one slip instead of one slip per category
    pub merge_print: bool,
    #[serde(deserialize_with = "lenient_decimal")]
    pub gst_rate_percent: Decimal,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            show_header: true,
            show_footer: true,
            show_operator: true,
            show_customer: true,
            show_gst: true,
            show_wastage: true,
            show_making_charge: true,
            show_device_name: true,
            wastage_display: ChargeDisplay::Rate,
            making_charge_display: ChargeDisplay::Rate,
            paper_width: default_paper_width(),
            merge_print: true,
            gst_rate_percent: Decimal::from(3),
        }
    }
}

fn default_paper_width() -> String {
    "80mm".to_string()
}
