//! Cleanup of MIME leftovers in bodies about to be stored

use regex::Regex;

static EXCESS_NEWLINES: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

const LEAKED_HEADERS: [&str; 4] = [
    "content-type:",
    "content-transfer-encoding:",
    "content-disposition:",
    "mime-version:",
];

/// Remove boundary lines and leaked part headers, then collapse blank runs
///
/// Header continuation lines (leading whitespace) that follow a removed
/// header are removed with it.
#[must_use]
pub fn clean_mime_artifacts(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut in_header = false;

    for line in text.lines() {
        if in_header && line.starts_with([' ', '\t']) && !line.trim().is_empty() {
            continue;
        }
        in_header = is_leaked_header(line);
        if in_header || is_boundary(line) {
            continue;
        }
        kept.push(line);
    }

    let joined = kept.join("\n");
    EXCESS_NEWLINES
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}

fn is_leaked_header(line: &str) -> bool {
    let lower = line.trim_start().to_ascii_lowercase();
    LEAKED_HEADERS.iter().any(|h| lower.starts_with(h))
}

/// `--token` or `--token--` where the token looks like a MIME boundary
fn is_boundary(line: &str) -> bool {
    let Some(token) = line.trim_end().strip_prefix("--") else {
        return false;
    };
    let token = token.strip_suffix("--").unwrap_or(token);

    token.len() >= 6
        && token.chars().any(|c| c.is_ascii_alphanumeric())
        && token.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '\'' | '(' | ')' | '+' | '_' | ',' | '-' | '.' | '/' | ':' | '=' | '?')
        })
}
