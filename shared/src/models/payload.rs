//! Full render payload

use super::{
    AdvanceItem, ChitItem, CustomerDetails, EstimationItem, PurchaseItem, ReceiptConfig,
    ShopDetails,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Everything one render call needs, assembled by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptPayload {
    pub items: Vec<EstimationItem>,
    pub purchases: Vec<PurchaseItem>,
    pub chits: Vec<ChitItem>,
    pub advances: Vec<AdvanceItem>,
    pub shop: ShopDetails,
    pub config: ReceiptConfig,
    pub customer: Option<CustomerDetails>,
    pub operator: Option<String>,
    /// Estimation sequence number for the current business day
    pub estimation_number: Option<u32>,
    /// Supplied by the caller; the renderers never read the wall clock
    pub issued_at: Option<NaiveDateTime>,
}
