//! HTML to plain text flattening

use regex::{Captures, Regex};

static SCRIPT: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").unwrap());

static STYLE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style\s*>").unwrap());

static COMMENT: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

// Closing block elements and <br>; inline elements deliberately absent
static BLOCK_BREAK: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"(?i)</(?:p|div|tr|li|h[1-6]|table|thead|tbody|ul|ol|blockquote|section|article|header|footer)\s*>|<br\s*/?>",
    )
    .unwrap()
});

static TAG: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"<[A-Za-z/!?][^>]*>").unwrap());

static ENTITY: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9A-Fa-f]{1,6})|([A-Za-z]{2,6}));").unwrap()
});

static WHITESPACE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s+").unwrap());

static HTML_MARKUP: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)<(?:html|head|body|div|p|br|span|table|td|tr|a|b|strong|font|center|img)\b[^>]*>")
        .unwrap()
});

/// Flatten HTML into a single line of plain text
///
/// Script and style elements and comments are removed with their content.
/// Closing block elements become line breaks before all whitespace is
/// collapsed, so `<div>12</div><div>34</div>` yields `12 34` while
/// `<span>12</span><span>34</span>` yields `1234`.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let text = SCRIPT.replace_all(html, "");
    let text = STYLE.replace_all(&text, "");
    let text = COMMENT.replace_all(&text, "");
    let text = BLOCK_BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Check whether a supposedly plain text body carries HTML markup
#[must_use]
pub fn looks_like_html(text: &str) -> bool {
    HTML_MARKUP.is_match(text)
}

/// Decode named and numeric character references in one pass
///
/// Unknown names and invalid code points are left as written.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| named_entity(name.as_str()))
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => None,
    }
}
