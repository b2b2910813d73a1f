//! Core types for inbound emails and extraction results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inbound email as delivered to the webhook, before any normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEmail {
    /// Recipient address (may include a display name)
    pub to: String,

    /// Sender address (may include a display name)
    pub from: String,

    /// Subject line
    pub subject: String,

    /// Plain text part, possibly still transfer-encoded
    pub text: String,

    /// HTML part, possibly still transfer-encoded
    pub html: String,

    /// Size in bytes of the raw message as received
    pub raw_size: usize,
}

impl RawEmail {
    /// Recipient parsed as an address, if it has an `@`
    #[must_use]
    pub fn recipient(&self) -> Option<EmailAddress> {
        EmailAddress::parse(&self.to)
    }
}

/// Email address with optional display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    /// Display name (e.g., "Acme Security")
    pub name: Option<String>,

    /// Email address (e.g., "abc123@relay.example")
    pub address: String,

    /// Domain extracted from address
    pub domain: String,

    /// Local part (before @), which identifies the mailbox
    pub local_part: String,
}

impl EmailAddress {
    /// Parse an email address from a string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        // "Name <local@domain>" format
        if let Some(start) = s.find('<')
            && let Some(end) = s[start..].find('>').map(|e| start + e)
        {
            let name_part = s[..start].trim().trim_matches('"');
            let address = s[start + 1..end].trim();

            return Self::from_parts(address).map(|mut addr| {
                if !name_part.is_empty() {
                    addr.name = Some(name_part.to_string());
                }
                addr
            });
        }

        Self::from_parts(s)
    }

    fn from_parts(address: &str) -> Option<Self> {
        let (local, domain) = address.split_once('@')?;
        if local.is_empty() {
            return None;
        }
        Some(Self {
            name: None,
            address: address.to_string(),
            domain: domain.to_string(),
            local_part: local.to_string(),
        })
    }

    /// Mailbox key: the local part, lowercased
    #[must_use]
    pub fn mailbox_key(&self) -> String {
        self.local_part.to_lowercase()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// OTP and verification links found in one email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Selected one-time passcode, if any
    pub otp: Option<String>,

    /// Verification links in discovery order, deduplicated, at most five
    #[serde(rename = "verification_links")]
    pub links: Vec<String>,
}

impl VerificationResult {
    /// Check if nothing was extracted
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.otp.is_none() && self.links.is_empty()
    }
}

/// Mailbox identifier assigned by the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MailboxId(pub String);

impl MailboxId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MailboxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A disposable mailbox known to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub id: MailboxId,
    pub account_id: String,
    pub local_part: String,
}

/// Message record handed to the store for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub mailbox_id: MailboxId,
    pub from_address: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    pub otp: Option<String>,
    pub verification_links: Vec<String>,
    pub raw_size: usize,
    pub received_at: DateTime<Utc>,
}

/// Outcome reported back to the mail transport
///
/// Every variant is an acknowledgement; the transport must not retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStatus {
    /// Stored in the recipient's mailbox
    Delivered,
    /// No mailbox for the recipient
    Dropped,
    /// Mailbox reached its daily cap
    RateLimited,
}

impl IngestStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Dropped => "dropped",
            Self::RateLimited => "rate_limited",
        }
    }
}

impl fmt::Display for IngestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
