//! Estimation Item Model

use crate::util::{lenient_count, lenient_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the wastage (VA) figure is expressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WastageType {
    /// Percentage of net weight
    #[default]
    #[serde(alias = "percent", alias = "%")]
    Percentage,
    /// Absolute grams
    #[serde(alias = "gram", alias = "g")]
    Grams,
}

/// How the making charge (MC) figure is expressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MakingChargeType {
    /// Percentage of metal value
    #[default]
    #[serde(alias = "percent", alias = "%")]
    Percentage,
    /// Rupees per gram of net weight
    #[serde(alias = "pergram", alias = "perGram")]
    PerGram,
    /// Flat amount per line
    #[serde(alias = "flat")]
    Fixed,
}

/// A priced merchandise line on an estimation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimationItem {
    #[serde(default)]
    pub name: String,
    /// Barcode / tag identifier
    pub tag: Option<String>,
    #[serde(default = "default_pieces", deserialize_with = "lenient_count")]
    pub pieces: u32,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gross_weight: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub stone_weight: Decimal,
    /// e.g. "GOLD", "SILVER"
    #[serde(default)]
    pub metal: String,
    /// e.g. "22K", "916"
    #[serde(default)]
    pub purity: String,
    /// Rate per gram
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rate: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub wastage: Decimal,
    #[serde(default)]
    pub wastage_type: WastageType,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub making_charge: Decimal,
    #[serde(default)]
    pub making_charge_type: MakingChargeType,
}

fn default_pieces() -> u32 {
    1
}

impl EstimationItem {
    /// Net metal weight: gross minus stone
    pub fn net_weight(&self) -> Decimal {
        self.gross_weight.saturating_sub(self.stone_weight)
    }

    /// Display name including the tag when one is set
    pub fn display_name(&self) -> String {
        match crate::util::non_blank(self.tag.as_deref()) {
            Some(tag) => format!("{} #{}", self.name.trim(), tag),
            None => self.name.trim().to_string(),
        }
    }
}
