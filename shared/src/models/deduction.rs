//! Cash deductions: chit scheme redemptions and customer advances

use crate::util::lenient_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Prepaid savings-scheme redemption
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChitItem {
    /// Scheme / card identifier
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
}

/// Cash advance previously paid by the customer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvanceItem {
    /// Advance receipt identifier
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
}
