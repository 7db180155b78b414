//! Data models
//!
//! Receipt payload types handed to the rendering core by screen code.
//! All of them are transient: built for one render call and discarded.

pub mod deduction;
pub mod estimation;
pub mod payload;
pub mod purchase;
pub mod receipt_config;
pub mod shop;

// Re-exports
pub use deduction::*;
pub use estimation::*;
pub use payload::*;
pub use purchase::*;
pub use receipt_config::*;
pub use shop::*;
