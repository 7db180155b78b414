//! Shop and customer display metadata

use serde::{Deserialize, Serialize};

/// Shop header/footer metadata (display only)
///
/// Any field may be blank or absent; the corresponding line is then skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopDetails {
    pub name: Option<String>,
    /// May span several lines separated by `\n`
    pub address: Option<String>,
    pub phone: Option<String>,
    /// GSTIN
    pub gst_number: Option<String>,
    pub device_label: Option<String>,
    pub footer_message: Option<String>,
}

/// Customer block shown under the title
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
