//! Verification link extraction
//!
//! Links are taken from the bodies before full quoted-printable decoding:
//! decoding every `=XX` would corrupt query strings such as `?key=ab12`, and
//! would turn real percent-encoding (`%3D`) into the character it stands for.

use crate::decode::{decode_base64, escape_bytes, looks_quoted_printable, remove_soft_line_breaks};
use regex::{Captures, Regex};

/// Maximum number of links kept per email
pub const MAX_LINKS: usize = 5;

/// Case-insensitive markers of a verification URL
pub const LINK_KEYWORDS: [&str; 8] = [
    "verify",
    "confirm",
    "activate",
    "reset",
    "token",
    "auth",
    "callback",
    "action-token",
];

const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', ')', ']', '}', '\'', '"', '*', '>', '<',
];

// RFC 3986 reserved characters; kept percent-encoded when they arrive as QP escapes
const URL_RESERVED: &[u8] = b":/?#[]@!$&'()*+,;=";

static URL_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s<>"'`]+"#).unwrap());

static QUERY_CODE_PARAM: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)[?&](?:code|token|key)=").unwrap());

static QP_ESCAPE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"=[0-9A-F]{2}").unwrap());

/// Extract verification links from the raw text and HTML bodies
///
/// Links are returned in order of appearance, text part first, without
/// duplicates and capped at [`MAX_LINKS`]. Whole-body base64 parts are
/// decoded first since that encoding cannot damage a URL.
#[must_use]
pub fn extract_links(text: &str, html: &str) -> Vec<String> {
    let text = decode_base64(text).unwrap_or_else(|| text.to_string());
    let html = decode_base64(html).unwrap_or_else(|| html.to_string());
    let surface = prepare_link_surface(&format!("{text}\n{html}"));
    let mut links: Vec<String> = Vec::new();

    for m in URL_REGEX.find_iter(&surface) {
        let link = clean_link(m.as_str());
        if is_verification_link(&link) && !links.contains(&link) {
            links.push(link);
            if links.len() == MAX_LINKS {
                break;
            }
        }
    }

    links
}

/// Undo quoted-printable line wrapping and escapes without breaking URLs
///
/// Only applied when the content shows QP artifacts. `=3D` becomes `=`;
/// other escapes are decoded only when they stand for a printable ASCII
/// character that is neither `%` nor reserved in URLs, and are rewritten as
/// percent-encoding otherwise.
#[must_use]
pub fn prepare_link_surface(raw: &str) -> String {
    if !looks_quoted_printable(raw) {
        return raw.to_string();
    }
    let joined = remove_soft_line_breaks(raw);
    QP_ESCAPE
        .replace_all(&joined, |caps: &Captures| {
            let Some(&byte) = escape_bytes(&caps[0]).first() else {
                return caps[0].to_string();
            };
            url_safe_char(byte)
        })
        .into_owned()
}

fn url_safe_char(byte: u8) -> String {
    if byte == b'=' || is_url_safe(byte) {
        char::from(byte).to_string()
    } else {
        format!("%{byte:02X}")
    }
}

fn is_url_safe(byte: u8) -> bool {
    (0x21..=0x7E).contains(&byte) && byte != b'%' && !URL_RESERVED.contains(&byte)
}

/// Decode common entities and drop trailing sentence punctuation
#[must_use]
pub fn clean_link(raw: &str) -> String {
    let decoded = raw
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    decoded.trim_end_matches(TRAILING_PUNCTUATION).to_string()
}

/// Check if a URL looks like a verification or confirmation link
#[must_use]
pub fn is_verification_link(url: &str) -> bool {
    let lower = url.to_lowercase();
    let has_host = lower
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.is_empty());

    has_host
        && (LINK_KEYWORDS.iter().any(|k| lower.contains(k)) || QUERY_CODE_PARAM.is_match(url))
}
