//! Inbound content acquisition
//!
//! The webhook receives either a JSON payload produced by a forwarding worker
//! or the raw RFC 5322 message. Both end up as a [`RawEmail`].

use crate::error::Result;
use crate::types::RawEmail;
use serde::Deserialize;
use tracing::debug;

/// JSON body posted by forwarding workers
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsonPayload {
    to: Option<AddressField>,
    from: Option<String>,
    subject: Option<String>,
    text: Option<String>,
    html: Option<String>,
    raw: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AddressField {
    One(String),
    Many(Vec<String>),
}

impl AddressField {
    fn into_first(self) -> String {
        match self {
            Self::One(s) => s,
            Self::Many(list) => list.into_iter().next().unwrap_or_default(),
        }
    }
}

/// Parse a webhook body according to its content type
pub fn parse_inbound(content_type: &str, body: &[u8]) -> Result<RawEmail> {
    if content_type.to_lowercase().contains("application/json") {
        parse_json_payload(body)
    } else {
        parse_raw_message(body)
    }
}

/// Parse a JSON `{to, from, subject, text, html, raw}` payload
///
/// Absent fields become empty strings.
pub fn parse_json_payload(body: &[u8]) -> Result<RawEmail> {
    let payload: JsonPayload = serde_json::from_slice(body)?;
    let raw = payload.raw.unwrap_or_default();

    debug!(raw_size = raw.len(), "parsed json webhook payload");

    Ok(RawEmail {
        to: payload.to.map(AddressField::into_first).unwrap_or_default(),
        from: payload.from.unwrap_or_default(),
        subject: payload.subject.unwrap_or_default(),
        text: payload.text.unwrap_or_default(),
        html: payload.html.unwrap_or_default(),
        raw_size: raw.len(),
    })
}

/// Parse a raw RFC 5322 message
pub fn parse_raw_message(raw: &[u8]) -> Result<RawEmail> {
    let parsed = mailparse::parse_mail(raw)?;

    let to = header_value(&parsed.headers, "to");
    let from = header_value(&parsed.headers, "from");
    let subject = header_value(&parsed.headers, "subject");
    let (text, html) = extract_body_parts(&parsed);

    debug!(
        raw_size = raw.len(),
        text_len = text.len(),
        html_len = html.len(),
        "parsed raw rfc5322 message"
    );

    Ok(RawEmail {
        to: first_address(&to),
        from,
        subject,
        text,
        html,
        raw_size: raw.len(),
    })
}

fn header_value(headers: &[mailparse::MailHeader], name: &str) -> String {
    headers
        .iter()
        .find(|h| h.get_key().eq_ignore_ascii_case(name))
        .map(mailparse::MailHeader::get_value)
        .unwrap_or_default()
}

// First entry of an address list; commas inside quoted names are not split
fn first_address(list: &str) -> String {
    let mut in_quotes = false;
    for (i, c) in list.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => return list[..i].trim().to_string(),
            _ => {}
        }
    }
    list.trim().to_string()
}

fn extract_body_parts(parsed: &mailparse::ParsedMail) -> (String, String) {
    let mut text = String::new();
    let mut html = String::new();

    if parsed.subparts.is_empty() {
        let content_type = parsed.ctype.mimetype.to_lowercase();
        match parsed.get_body() {
            Ok(body) if content_type.contains("text/html") => html = body,
            Ok(body) => text = body,
            Err(e) => debug!(error = %e, "undecodable single-part body"),
        }
    } else {
        extract_body_recursive(parsed, &mut text, &mut html);
    }

    (text, html)
}

fn extract_body_recursive(parsed: &mailparse::ParsedMail, text: &mut String, html: &mut String) {
    for part in &parsed.subparts {
        let content_type = part.ctype.mimetype.to_lowercase();

        if part.subparts.is_empty() {
            let Ok(body) = part.get_body() else {
                continue;
            };
            if content_type.contains("text/plain") && text.is_empty() {
                *text = body;
            } else if content_type.contains("text/html") && html.is_empty() {
                *html = body;
            }
        } else {
            extract_body_recursive(part, text, html);
        }
    }
}
