//! ESC/POS text-stream builder
//!
//! Accumulates a UTF-8 `String` of printable text interleaved with the
//! small command set receipts are allowed to use. Code-page conversion
//! happens separately (see `encode_stream`).

use crate::encoding::text_width;

/// The only control sequences a receipt stream may contain
pub mod commands {
    /// ESC @ - initialize printer
    pub const RESET: &str = "\x1B\x40";
    /// ESC a 0
    pub const ALIGN_LEFT: &str = "\x1B\x61\x00";
    /// ESC a 1
    pub const ALIGN_CENTER: &str = "\x1B\x61\x01";
    /// ESC a 2
    pub const ALIGN_RIGHT: &str = "\x1B\x61\x02";
    /// ESC E 1
    pub const BOLD_ON: &str = "\x1B\x45\x01";
    /// ESC E 0
    pub const BOLD_OFF: &str = "\x1B\x45\x00";
    /// GS ! 0x11 - double width and height
    pub const DOUBLE_ON: &str = "\x1D\x21\x11";
    /// GS ! 0x00
    pub const DOUBLE_OFF: &str = "\x1D\x21\x00";
}

/// Receipt stream under construction
///
/// `width` is the line length in normal-size characters for the paper tier
/// (32 / 48 / 64 on 58 / 80 / 112mm paper).
pub struct EscPosTextBuilder {
    buf: String,
    width: usize,
}

impl EscPosTextBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::with_capacity(2048),
            width,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn push(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    pub fn write(&mut self, s: &str) -> &mut Self {
        self.push(s)
    }

    pub fn write_line(&mut self, s: &str) -> &mut Self {
        self.push(s).push("\n")
    }

    pub fn newline(&mut self) -> &mut Self {
        self.push("\n")
    }

    /// Advance the paper with plain line feeds
    pub fn feed(&mut self, lines: usize) -> &mut Self {
        for _ in 0..lines {
            self.buf.push('\n');
        }
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        self.push(commands::RESET)
    }

    pub fn align_center(&mut self) -> &mut Self {
        self.push(commands::ALIGN_CENTER)
    }

    pub fn align_left(&mut self) -> &mut Self {
        self.push(commands::ALIGN_LEFT)
    }

    pub fn align_right(&mut self) -> &mut Self {
        self.push(commands::ALIGN_RIGHT)
    }

    pub fn bold_on(&mut self) -> &mut Self {
        self.push(commands::BOLD_ON)
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.push(commands::BOLD_OFF)
    }

    /// Double width and height; a line then holds `width / 2` glyphs
    pub fn size_double(&mut self) -> &mut Self {
        self.push(commands::DOUBLE_ON)
    }

    pub fn size_reset(&mut self) -> &mut Self {
        self.push(commands::DOUBLE_OFF)
    }

    /// Full-width `=` rule
    pub fn eq_sep(&mut self) -> &mut Self {
        self.rule('=')
    }

    /// Full-width `-` rule
    pub fn dash_sep(&mut self) -> &mut Self {
        self.rule('-')
    }

    fn rule(&mut self, c: char) -> &mut Self {
        for _ in 0..self.width {
            self.buf.push(c);
        }
        self.push("\n")
    }

    /// Label flush left, value flush right
    ///
    /// When both do not fit they are joined by one space and the printer
    /// wraps the line.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let width = self.width;
        self.spread(left, right, width)
    }

    /// `line_lr` for double-size text
    pub fn line_lr_double(&mut self, left: &str, right: &str) -> &mut Self {
        let width = self.width / 2;
        self.spread(left, right, width)
    }

    fn spread(&mut self, left: &str, right: &str, width: usize) -> &mut Self {
        let used = text_width(left) + text_width(right);
        let gap = if used >= width { 1 } else { width - used };
        self.push(left);
        for _ in 0..gap {
            self.buf.push(' ');
        }
        self.push(right).push("\n")
    }

    pub fn finalize(self) -> String {
        self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl Default for EscPosTextBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let mut b = EscPosTextBuilder::new(32);
        b.reset()
            .align_center()
            .size_double()
            .write_line("SHOP")
            .size_reset()
            .align_left()
            .write_line("body");

        let s = b.finalize();
        assert!(s.starts_with("\x1B\x40\x1B\x61\x01\x1D\x21\x11SHOP\n"));
        assert!(s.ends_with("body\n"));
    }

    #[test]
    fn test_line_lr() {
        let mut b = EscPosTextBuilder::new(20);
        b.line_lr("Gross Wt", "10.500g");

        let s = b.finalize();
        assert_eq!(s, "Gross Wt     10.500g\n");
        assert_eq!(s.len(), 21);
    }

    #[test]
    fn test_line_lr_overflow_falls_back_to_single_space() {
        let mut b = EscPosTextBuilder::new(10);
        b.line_lr("Estimation Amount", "Rs.32,033");

        assert_eq!(b.as_str(), "Estimation Amount Rs.32,033\n");
    }

    #[test]
    fn test_line_lr_double_uses_half_width() {
        let mut b = EscPosTextBuilder::new(32);
        b.line_lr_double("NET", "Rs.5");

        assert_eq!(b.as_str(), format!("NET{}Rs.5\n", " ".repeat(9)));
    }

    #[test]
    fn test_separators() {
        let mut b = EscPosTextBuilder::new(10);
        b.eq_sep().dash_sep();

        assert_eq!(b.finalize(), "==========\n----------\n");
    }

    #[test]
    fn test_feed_uses_plain_newlines() {
        let mut b = EscPosTextBuilder::new(10);
        b.feed(4);
        assert_eq!(b.finalize(), "\n\n\n\n");
    }
}
