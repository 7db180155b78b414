//! Shared types for the Karat estimation workspace
//!
//! Transient receipt payload types assembled by screen code and consumed by
//! the rendering core. Nothing here performs I/O or owns long-lived state.

pub mod models;
pub mod util;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use models::{
    AdvanceItem, ChargeDisplay, ChitItem, CustomerDetails, EstimationItem, LessType,
    MakingChargeType, PurchaseItem, ReceiptConfig, ReceiptPayload, ShopDetails, WastageType,
};
