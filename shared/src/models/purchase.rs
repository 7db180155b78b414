//! Purchase (old metal) Item Model

use crate::util::{lenient_count, lenient_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the "less" deduction on old metal is expressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessType {
    /// Grams subtracted from gross weight
    #[default]
    #[serde(alias = "gram", alias = "g")]
    Grams,
    /// Percentage of gross weight subtracted
    #[serde(alias = "percent", alias = "%")]
    Percentage,
    /// Rupees subtracted from the computed amount
    #[serde(alias = "rs", alias = "value")]
    Amount,
}

/// Old metal bought back from the customer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseItem {
    #[serde(default)]
    pub category: String,
    pub sub_category: Option<String>,
    #[serde(default)]
    pub purity: String,
    #[serde(default = "default_pieces", deserialize_with = "lenient_count")]
    pub pieces: u32,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gross_weight: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub less: Decimal,
    #[serde(default)]
    pub less_type: LessType,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rate: Decimal,
}

fn default_pieces() -> u32 {
    1
}

impl PurchaseItem {
    /// "Category / Sub-category" when a sub-category is set
    pub fn display_name(&self) -> String {
        match crate::util::non_blank(self.sub_category.as_deref()) {
            Some(sub) => format!("{} / {}", self.category.trim(), sub),
            None => self.category.trim().to_string(),
        }
    }
}
