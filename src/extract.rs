//! Normalization and extraction pipeline
//!
//! Every function here is a pure transformation of one email. The stage
//! order matters: transfer decoding must come before HTML flattening (the
//! markup itself may be encoded), and invisible characters are stripped last
//! because they may arrive as `=E2=80=8B` or `&#8203;`.

use crate::decode::decode;
use crate::html::{html_to_text, looks_like_html};
use crate::links::extract_links;
use crate::mime::clean_mime_artifacts;
use crate::obfuscation::strip_invisible;
use crate::otp::{OtpInput, find_otp};
use crate::types::{RawEmail, VerificationResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Plain text lanes derived from one email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedBody {
    /// Decoded text part (flattened if it carried markup)
    pub decoded_text: String,

    /// Decoded and flattened HTML part
    pub decoded_html: String,
}

impl NormalizedBody {
    /// Normalize the raw text and HTML parts
    #[must_use]
    pub fn new(text: &str, html: &str) -> Self {
        Self {
            decoded_text: normalize_text(text),
            decoded_html: normalize_html(html),
        }
    }
}

/// Decode, flatten if needed, and strip invisible characters from a text part
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let decoded = decode(text);
    if looks_like_html(&decoded) {
        strip_invisible(&html_to_text(&decoded))
    } else {
        strip_invisible(&decoded)
    }
}

/// Decode, flatten, and strip invisible characters from an HTML part
#[must_use]
pub fn normalize_html(html: &str) -> String {
    strip_invisible(&html_to_text(&decode(html)))
}

/// Extract the OTP and verification links from raw text and HTML parts
///
/// Links are found on the undecoded content; the OTP on the normalized
/// lanes. Missing parts are passed as empty strings.
#[must_use]
pub fn extract(text: &str, html: &str) -> VerificationResult {
    let links = extract_links(text, html);
    let body = NormalizedBody::new(text, html);
    let found = find_otp(&OtpInput::new(&body.decoded_text, &body.decoded_html, &links));

    debug!(
        otp_rule = found.as_ref().map(|m| m.rule.as_str()),
        link_count = links.len(),
        "verification extraction finished"
    );

    VerificationResult {
        otp: found.map(|m| m.code),
        links,
    }
}

/// Bodies ready for storage plus the extraction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedEmail {
    pub text_body: String,
    pub html_body: String,
    pub verification: VerificationResult,
}

/// Run extraction and prepare the stored copies of both bodies
///
/// The stored text is decoded and stripped of invisible characters; the
/// stored HTML is decoded but kept as markup. Both lose MIME leftovers.
#[must_use]
pub fn process(email: &RawEmail) -> ProcessedEmail {
    let verification = extract(&email.text, &email.html);

    ProcessedEmail {
        text_body: clean_mime_artifacts(&strip_invisible(&decode(&email.text))),
        html_body: clean_mime_artifacts(&decode(&email.html)),
        verification,
    }
}
