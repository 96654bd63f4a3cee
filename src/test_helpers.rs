//! Common test helper functions shared across test modules.
//!
//! This module provides reusable utilities for creating test fixtures and
//! fake collaborators, reducing duplication across test suites.
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::json;

use crate::{
    config::{Config, ConfigBuilder, RepoIdentifier},
    error::Result,
    forge::{
        traits::ReleaseRepository,
        types::{CreateReleaseRequest, ReleaseRecord, UpdateReleaseRequest},
    },
    webhook::{
        payload::PullRequestEvent,
        request::{SIGNATURE_HEADER, WebhookRequest},
        signature::{compute_digest, format_signature_header},
    },
};

pub const TEST_SECRET: &str = "test-webhook-secret";

/// Creates a test Config with default branch `master`, prefix `v` and
/// initial version `0.0.1`.
///
/// # Example
/// ```ignore
/// let config = create_test_config();
/// ```
pub fn create_test_config() -> Config {
    ConfigBuilder::default()
        .secret(SecretString::from(TEST_SECRET))
        .repo(RepoIdentifier {
            owner: "test".into(),
            name: "repo".into(),
        })
        .build()
        .unwrap()
}

/// A closed, merged pull request into `master`.
pub fn pull_request_event(title: &str, url: &str) -> PullRequestEvent {
    PullRequestEvent {
        action: "closed".into(),
        merged: true,
        merge_commit_sha: Some("abc123".into()),
        html_url: url.into(),
        title: title.into(),
        base_ref: "master".into(),
    }
}

pub fn release_record(
    id: u64,
    tag: &str,
    body: &str,
    is_draft: bool,
) -> ReleaseRecord {
    ReleaseRecord {
        id,
        tag: tag.into(),
        title: tag.into(),
        body: body.into(),
        is_draft,
    }
}

/// Raw JSON body of a pull request event.
pub fn pull_request_payload(
    action: &str,
    merged: bool,
    base: &str,
    title: &str,
    url: &str,
) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "action": action,
        "pull_request": {
            "merged": merged,
            "merge_commit_sha": "abc123",
            "html_url": url,
            "title": title,
            "base": { "ref": base }
        }
    }))
    .unwrap()
}

/// `sha1=<hex>` header value for `body` signed with [`TEST_SECRET`].
pub fn sign(body: &[u8]) -> String {
    format_signature_header(&compute_digest(body, TEST_SECRET.as_bytes()))
}

/// A POST request carrying a valid signature for `body`.
pub fn signed_request(body: Vec<u8>) -> WebhookRequest {
    let signature = sign(&body);
    WebhookRequest::new("POST", [(SIGNATURE_HEADER, signature)], body)
}

/// Repository that never answers within a reasonable time.
pub struct SlowRepository {
    pub delay: Duration,
}

#[async_trait]
impl ReleaseRepository for SlowRepository {
    fn repo_name(&self) -> String {
        "test/slow".into()
    }

    async fn list_releases(&self) -> Result<Vec<ReleaseRecord>> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![])
    }

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<ReleaseRecord> {
        tokio::time::sleep(self.delay).await;
        Ok(release_record(1, &req.tag, &req.body, req.draft))
    }

    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<ReleaseRecord> {
        tokio::time::sleep(self.delay).await;
        Ok(release_record(req.id, &req.tag, &req.body, req.draft))
    }
}
