//! Transfer-encoding normalization
//!
//! Forwarders sometimes drop `Content-Transfer-Encoding`, so bodies are
//! inspected for quoted-printable escapes and whole-body base64 regardless of
//! what the headers claimed. A guess that does not verify leaves the input
//! untouched.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use regex::{Captures, Regex};

/// Shortest compacted body that is considered for base64 decoding
pub const MIN_BASE64_LEN: usize = 20;

static SOFT_LINE_BREAK: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"=[ \t]*\r?\n").unwrap());

static QP_ESCAPE_RUN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?:=[0-9A-F]{2})+").unwrap());

static BASE64_BODY: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").unwrap());

/// Reverse any transfer encoding found in `raw`
///
/// Whole-body base64 is tried first; when it does not apply, quoted-printable
/// escapes are resolved. Already-decoded text passes through unchanged.
#[must_use]
pub fn decode(raw: &str) -> String {
    if let Some(decoded) = decode_base64(raw) {
        return decoded;
    }
    decode_quoted_printable(raw)
}

/// Check whether `text` carries quoted-printable artifacts
///
/// Soft line breaks and `=3D` (an encoded `=`) are the markers that survive
/// even when the header declaring the encoding was lost.
#[must_use]
pub fn looks_quoted_printable(text: &str) -> bool {
    text.contains("=3D") || SOFT_LINE_BREAK.is_match(text)
}

/// Remove soft line breaks
#[must_use]
pub fn remove_soft_line_breaks(text: &str) -> String {
    SOFT_LINE_BREAK.replace_all(text, "").into_owned()
}

/// Decode quoted-printable escapes
///
/// Consecutive `=XX` tokens are decoded together so that multi-byte UTF-8
/// sequences split across escapes come out as one character. A run that is
/// not valid UTF-8 is mapped byte-for-byte (Latin-1).
#[must_use]
pub fn decode_quoted_printable(text: &str) -> String {
    let joined = remove_soft_line_breaks(text);
    QP_ESCAPE_RUN
        .replace_all(&joined, |caps: &Captures| decode_escape_run(&caps[0]))
        .into_owned()
}

fn decode_escape_run(run: &str) -> String {
    let bytes = escape_bytes(run);
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Bytes of a run of `=XX` escapes
pub(crate) fn escape_bytes(run: &str) -> Vec<u8> {
    run.as_bytes()
        .chunks_exact(3)
        .filter_map(|chunk| {
            let hex = std::str::from_utf8(&chunk[1..]).ok()?;
            u8::from_str_radix(hex, 16).ok()
        })
        .collect()
}

/// Decode `raw` as base64 when the whole body looks like base64
///
/// Returns `None` when the body is too short, contains characters outside the
/// base64 alphabet, fails to decode, or decodes to something that is not
/// printable text.
#[must_use]
pub fn decode_base64(raw: &str) -> Option<String> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect();

    if compact.len() <= MIN_BASE64_LEN || !BASE64_BODY.is_match(&compact) {
        return None;
    }

    let bytes = STANDARD
        .decode(&compact)
        .or_else(|_| STANDARD_NO_PAD.decode(&compact))
        .ok()?;
    let text = String::from_utf8(bytes).ok()?;

    is_printable_text(&text).then_some(text)
}

fn is_printable_text(text: &str) -> bool {
    let has_visible = text.chars().any(|c| !c.is_whitespace());
    let has_control = text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'));
    has_visible && !has_control
}
