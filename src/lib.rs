// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Verification Email Relay
//!
//! Accepts inbound email for disposable mailboxes, finds the one-time
//! passcode and verification links inside it, and hands the result to a
//! mailbox store.
//!
//! # Pipeline
//!
//! - Transfer-encoding normalization (quoted-printable, headerless base64)
//! - HTML flattening that keeps block boundaries
//! - Invisible character stripping
//! - Multilingual, priority-ordered OTP matching
//! - Verification link extraction that preserves percent-encoding
//! - MIME leftover cleanup for stored bodies
//!
//! # Example
//!
//! ```rust
//! use otp_relay::extract;
//!
//! let result = extract(
//!     "Your code is: 789012. Confirm at https://ex.com/confirm?token=abc",
//!     "",
//! );
//!
//! assert_eq!(result.otp.as_deref(), Some("789012"));
//! assert_eq!(result.links, vec!["https://ex.com/confirm?token=abc"]);
//! ```

mod config;
mod decode;
mod error;
mod extract;
mod html;
mod ingest;
mod links;
mod mime;
mod obfuscation;
mod otp;
mod parser;
mod types;

pub use config::IngestConfig;
pub use decode::{decode, decode_base64, decode_quoted_printable, looks_quoted_printable};
pub use error::{RelayError, Result};
pub use extract::{NormalizedBody, ProcessedEmail, extract, normalize_html, normalize_text, process};
pub use html::{decode_entities, html_to_text, looks_like_html};
pub use ingest::{Ingestor, MailboxStore, truncate_chars};
pub use links::{MAX_LINKS, clean_link, extract_links, is_verification_link, prepare_link_surface};
pub use mime::clean_mime_artifacts;
pub use obfuscation::{is_invisible, strip_invisible};
pub use otp::{OtpInput, OtpMatch, OtpRule, find_otp, standalone_numbers};
pub use parser::{parse_inbound, parse_json_payload, parse_raw_message};
pub use types::*;
