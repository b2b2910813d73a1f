//! Webhook ingestion over an external mailbox store

use crate::config::IngestConfig;
use crate::error::{RelayError, Result};
use crate::extract::process;
use crate::parser::parse_inbound;
use crate::types::{IngestStatus, Mailbox, MailboxId, NewMessage, RawEmail};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Mailbox lookup and message persistence, provided by the host
///
/// Implementations report failures as [`RelayError::Storage`].
pub trait MailboxStore {
    /// Find the mailbox owning a lowercased local part
    fn find_mailbox_by_local_part(&self, local_part: &str) -> Result<Option<Mailbox>>;

    /// Count messages stored in a mailbox at or after `since`
    fn count_messages_since(&self, mailbox: &MailboxId, since: DateTime<Utc>) -> Result<u64>;

    /// Persist one message
    fn insert_message(&self, message: NewMessage) -> Result<()>;
}

/// Accepts inbound emails and stores them with their extracted codes
#[derive(Debug)]
pub struct Ingestor<S> {
    store: S,
    config: IngestConfig,
}

impl<S: MailboxStore> Ingestor<S> {
    #[must_use]
    pub const fn new(store: S, config: IngestConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Parse a webhook body and ingest it
    pub fn ingest_payload(&self, content_type: &str, body: &[u8]) -> Result<IngestStatus> {
        let email = parse_inbound(content_type, body)?;
        self.ingest(&email)
    }

    /// Ingest an email received now
    pub fn ingest(&self, email: &RawEmail) -> Result<IngestStatus> {
        self.ingest_at(email, Utc::now())
    }

    /// Ingest an email received at `now`
    pub fn ingest_at(&self, email: &RawEmail, now: DateTime<Utc>) -> Result<IngestStatus> {
        let local_part = email
            .recipient()
            .map(|addr| addr.mailbox_key())
            .ok_or_else(|| RelayError::InvalidRecipient(email.to.clone()))?;

        let Some(mailbox) = self.store.find_mailbox_by_local_part(&local_part)? else {
            info!(local_part = %local_part, status = "dropped", "unknown mailbox");
            return Ok(IngestStatus::Dropped);
        };

        let today = start_of_day(now);
        let count = self.store.count_messages_since(&mailbox.id, today)?;
        if count >= self.config.daily_message_limit {
            info!(
                mailbox = %mailbox.id,
                count,
                limit = self.config.daily_message_limit,
                status = "rate_limited",
                "daily message limit reached"
            );
            return Ok(IngestStatus::RateLimited);
        }

        let processed = process(email);
        let has_otp = processed.verification.otp.is_some();
        let link_count = processed.verification.links.len();

        let message = NewMessage {
            mailbox_id: mailbox.id.clone(),
            from_address: email.from.clone(),
            subject: email.subject.clone(),
            text_body: truncate_chars(&processed.text_body, self.config.max_text_body_chars),
            html_body: truncate_chars(&processed.html_body, self.config.max_html_body_chars),
            otp: processed.verification.otp,
            verification_links: processed.verification.links,
            raw_size: email.raw_size,
            received_at: now,
        };

        if let Err(e) = self.store.insert_message(message) {
            warn!(mailbox = %mailbox.id, error = %e, "failed to store message");
            return Err(e);
        }

        debug!(has_otp, link_count, "message stored");
        info!(mailbox = %mailbox.id, status = "delivered", "message delivered");
        Ok(IngestStatus::Delivered)
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |midnight| midnight.and_utc())
}

/// Keep at most `max` characters of `s`
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.char_indices()
        .nth(max)
        .map_or_else(|| s.to_string(), |(idx, _)| s[..idx].to_string())
}
