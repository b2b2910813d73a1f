//! Ingestion limits

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Limits applied when storing inbound messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Messages accepted per mailbox per UTC day
    pub daily_message_limit: u64,

    /// Characters of the text body kept in storage
    pub max_text_body_chars: usize,

    /// Characters of the HTML body kept in storage
    pub max_html_body_chars: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            daily_message_limit: 100,
            max_text_body_chars: 50_000,
            max_html_body_chars: 100_000,
        }
    }
}

impl IngestConfig {
    /// Load from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
