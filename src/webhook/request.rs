use std::collections::BTreeMap;

/// Header carrying the HMAC-SHA1 signature of the body.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

/// A single inbound webhook call.
///
/// The body is kept exactly as received: the signature covers the wire
/// bytes, so nothing may decode or re-encode it before verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    method: String,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
}

impl WebhookRequest {
    pub fn new<K, V>(
        method: impl Into<String>,
        headers: impl IntoIterator<Item = (K, V)>,
        body: impl Into<Vec<u8>>,
    ) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_ascii_lowercase(), value.into()))
            .collect();

        Self {
            method: method.into(),
            headers,
            body: body.into(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Header lookup, case-insensitive like HTTP header names.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
