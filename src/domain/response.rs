use std::borrow::Cow;

use serde_json::{Map, Value};

/// Decoded SMS Center response.
///
/// The shape depends on the remote method, so the object is kept untyped.
pub type SmscResponse = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw HTTP response as received, kept for diagnostics.
pub struct RawResponse {
    status: u16,
    body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Decompressed response body, exactly as received.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text for diagnostics; invalid UTF-8 is replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
