//! Parsing of GitHub `pull_request` event payloads.
//!
//! See <https://docs.github.com/en/webhooks/webhook-events-and-payloads#pull_request>.
//! Only the fields needed to decide on a release note are extracted; every
//! other field in the payload is ignored.
use serde::Deserialize;

use crate::error::{ReleaseNotesError, Result};

/// Maximum number of characters of a payload quoted in errors and logs.
pub const PAYLOAD_SNIPPET_LEN: usize = 200;

/// The parts of a pull request event that drive release notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub action: String,
    pub merged: bool,
    pub merge_commit_sha: Option<String>,
    pub html_url: String,
    pub title: String,
    pub base_ref: String,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    action: String,
    pull_request: PullRequestPayload,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    merged: bool,
    #[serde(default)]
    merge_commit_sha: Option<String>,
    html_url: String,
    title: String,
    base: BasePayload,
}

#[derive(Debug, Deserialize)]
struct BasePayload {
    #[serde(rename = "ref")]
    git_ref: String,
}

/// Extracts a [`PullRequestEvent`] from a raw JSON body.
#[derive(Debug, Default, Clone)]
pub struct PayloadParser {
    require_merge_commit_sha: bool,
}

impl PayloadParser {
    pub fn new(require_merge_commit_sha: bool) -> Self {
        Self {
            require_merge_commit_sha,
        }
    }

    /// Fails with `MalformedPayload` when any required key is missing or
    /// has the wrong type.
    pub fn parse(&self, payload: &[u8]) -> Result<PullRequestEvent> {
        let malformed = || ReleaseNotesError::MalformedPayload(snippet(payload));

        let parsed: EventPayload =
            serde_json::from_slice(payload).map_err(|_| malformed())?;

        let pr = parsed.pull_request;

        if self.require_merge_commit_sha && pr.merge_commit_sha.is_none() {
            return Err(malformed());
        }

        Ok(PullRequestEvent {
            action: parsed.action,
            merged: pr.merged,
            merge_commit_sha: pr.merge_commit_sha,
            html_url: pr.html_url,
            title: pr.title,
            base_ref: pr.base.git_ref,
        })
    }
}

/// Lossy, truncated rendering of a payload for diagnostics.
pub fn snippet(payload: &[u8]) -> String {
    let text = String::from_utf8_lossy(payload);
    let mut snippet: String = text.chars().take(PAYLOAD_SNIPPET_LEN).collect();
    if text.chars().count() > PAYLOAD_SNIPPET_LEN {
        snippet.push_str("...");
    }
    snippet
}
