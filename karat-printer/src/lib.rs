//! # karat-printer
//!
//! ESC/POS text-stream primitives for thermal receipt printing.
//!
//! ## Scope
//!
//! This crate handles HOW a receipt is encoded for a thermal printer:
//! - A string builder restricted to reset, justification, bold and
//!   double-size commands
//! - Column padding/truncation under a monospaced font
//! - Stripping control sequences for on-screen preview
//! - Code-page encoding of a finished stream
//! - The transport capability (`PrintSink`) the caller injects
//!
//! WHAT to print (sections, totals, titles) lives in `karat-receipt`.
//! Device discovery and connection management stay with the caller.
//!
//! ## Example
//!
//! ```
//! use karat_printer::{EscPosTextBuilder, pad_left, pad_right, strip_control_sequences};
//!
//! let mut b = EscPosTextBuilder::new(32);
//! b.reset();
//! b.align_center();
//! b.bold_on();
//! b.write_line("ESTIMATION SLIP");
//! b.bold_off();
//! b.align_left();
//! b.write_line(&format!("{} {}", pad_right("Ring", 20), pad_left("31,100", 11)));
//! let stream = b.finalize();
//!
//! assert!(strip_control_sequences(&stream).starts_with("ESTIMATION SLIP\n"));
//! ```

mod encoding;
mod error;
mod escpos;
mod sanitize;
mod sink;

// Re-exports
pub use encoding::{CodePage, encode_stream, pad, pad_left, pad_right, text_width, truncate_to_width};
pub use error::{PrintError, PrintResult};
pub use escpos::{EscPosTextBuilder, commands};
pub use sanitize::strip_control_sequences;
pub use sink::{MemorySink, PrintSink};
