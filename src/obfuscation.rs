//! Removal of invisible characters used to split up codes

/// Check if a character renders no glyph and is stripped before matching
///
/// Covers zero-width space, non-joiner and joiner, word joiner, byte order
/// mark, soft hyphen, and both variation selector blocks.
#[must_use]
pub const fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'
            | '\u{200C}'
            | '\u{200D}'
            | '\u{2060}'
            | '\u{FEFF}'
            | '\u{00AD}'
            | '\u{FE00}'..='\u{FE0F}'
            | '\u{E0100}'..='\u{E01EF}'
    )
}

/// Strip every invisible character from `text`
#[must_use]
pub fn strip_invisible(text: &str) -> String {
    text.chars().filter(|c| !is_invisible(*c)).collect()
}
