//! Event envelope (JSON).
//!
//! `data` is kept as `RawValue` so the event type can pick its own payload
//! shape after the envelope itself has been validated.

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::{ParleyError, Result};

/// Inbound envelope (Text frame).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// Event name (field name is `type` in JSON), e.g. `send-message`.
    #[serde(rename = "type")]
    pub event: String,
    /// Optional payload, stored as raw JSON (lazy parsing).
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

impl Envelope {
    pub fn parse(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| ParleyError::BadRequest(format!("invalid envelope json: {e}")))
    }

    /// Raw payload text, or an error naming the event that needed one.
    pub fn data_str(&self) -> Result<&str> {
        self.data
            .as_deref()
            .map(RawValue::get)
            .ok_or_else(|| ParleyError::BadRequest(format!("{} requires data", self.event)))
    }
}
