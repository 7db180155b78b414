//! Column width and code-page utilities
//!
//! Thermal printers render one glyph per cell in a monospaced grid, so
//! layout is measured in display columns. This module provides:
//! - Display width, truncation and padding to a column width
//! - Converting a finished UTF-8 stream to the printer's code page while
//!   preserving ESC/POS commands

use tracing::instrument;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Character table a sink expects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodePage {
    /// Single-byte Western table (most ESC/POS printers ship with it)
    #[default]
    Windows1252,
    /// Pass UTF-8 through untouched (system print pipelines, previews)
    Utf8,
}

/// Get the display width of a string in printer columns
pub fn text_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `max_width` columns
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut used = 0;
    s.chars()
        .take_while(|c| {
            used += UnicodeWidthChar::width(*c).unwrap_or(0);
            used <= max_width
        })
        .collect()
}

/// Fit `s` into exactly `width` columns
///
/// Short text is filled with spaces on the side away from `align_right`;
/// long text is cut to the column.
pub fn pad(s: &str, width: usize, align_right: bool) -> String {
    let fitted = if text_width(s) > width {
        truncate_to_width(s, width)
    } else {
        s.to_string()
    };
    // A wide glyph that did not fit leaves the cell one short
    let fill = " ".repeat(width.saturating_sub(text_width(&fitted)));
    if align_right {
        fill + &fitted
    } else {
        fitted + &fill
    }
}

/// Left-aligned cell: text followed by spaces
pub fn pad_right(s: &str, width: usize) -> String {
    pad(s, width, false)
}

/// Right-aligned cell: spaces followed by text
pub fn pad_left(s: &str, width: usize) -> String {
    pad(s, width, true)
}

/// Convert a UTF-8 stream (text + ESC/POS commands) to the given code page
///
/// ASCII bytes (0x00-0x7F) pass through exactly as is, which protects the
/// control sequences. Only non-ASCII runs are re-encoded.
///
/// For Windows-1252:
/// - The rupee sign (₹) becomes `Rs.`
/// - Characters without a mapping become `?`
#[instrument(skip(stream), fields(len = stream.len()))]
pub fn encode_stream(stream: &str, code_page: CodePage) -> Vec<u8> {
    if code_page == CodePage::Utf8 {
        return stream.as_bytes().to_vec();
    }

    let mut result = Vec::with_capacity(stream.len());
    let mut buf = [0u8; 4];
    let mut unmappable = 0usize;

    for c in stream.chars() {
        if c.is_ascii() {
            result.push(c as u8);
            continue;
        }
        if c == '₹' {
            result.extend_from_slice(b"Rs.");
            continue;
        }
        let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if had_errors {
            unmappable += 1;
            result.push(b'?');
        } else {
            result.extend_from_slice(&bytes);
        }
    }

    if unmappable > 0 {
        tracing::warn!(unmappable, "Characters without a code-page mapping replaced");
    }

    result
}
