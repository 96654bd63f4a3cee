//! Webhook orchestration: verify, parse, decide, mutate, respond.
//!
//! Every outcome maps to one of three response codes:
//!
//! - `200` handled, including deliveries that need no release change
//! - `302` rejected by method or signature checks
//! - `502` malformed payload, bad version tag or failed repository call
use log::*;

use crate::{
    config::Config,
    error::Result,
    forge::{manager::ForgeManager, types::UpdateReleaseRequest},
    release::decision::{Action, ReleaseDecisionEngine},
    webhook::{
        payload::PayloadParser, request::WebhookRequest,
        signature::SignatureVerifier,
    },
};

/// Transport level outcome of a webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    /// Handled, with or without a release change.
    Accepted,
    /// Failed method or signature validation.
    Rejected,
    /// Payload or release repository failure.
    BadGateway,
}

impl ResponseCode {
    pub fn as_u16(self) -> u16 {
        match self {
            ResponseCode::Accepted => 200,
            ResponseCode::Rejected => 302,
            ResponseCode::BadGateway => 502,
        }
    }
}

/// Response code together with the action that was carried out, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleOutcome {
    pub code: ResponseCode,
    pub action: Option<Action>,
}

/// Handle one webhook delivery.
pub async fn handle(
    request: &WebhookRequest,
    config: &Config,
    forge: &ForgeManager,
) -> ResponseCode {
    handle_with_outcome(request, config, forge).await.code
}

/// Like [`handle`], also reporting the decided action.
pub async fn handle_with_outcome(
    request: &WebhookRequest,
    config: &Config,
    forge: &ForgeManager,
) -> HandleOutcome {
    let verifier = SignatureVerifier::new(config.secret.clone());

    if let Err(err) = verifier.verify(request) {
        warn!("Webhook validation failed: {err}");
        return HandleOutcome {
            code: ResponseCode::Rejected,
            action: None,
        };
    }

    match update_release_notes(request.body(), config, forge).await {
        Ok(action) => {
            if action == Action::NoAction {
                info!("No action for delivery to {}", forge.repo_name());
            }
            HandleOutcome {
                code: ResponseCode::Accepted,
                action: Some(action),
            }
        }
        Err(err) => {
            error!("Failed to update release notes: {err}");
            HandleOutcome {
                code: ResponseCode::BadGateway,
                action: None,
            }
        }
    }
}

/// Parses a verified payload and applies at most one release mutation.
async fn update_release_notes(
    payload: &[u8],
    config: &Config,
    forge: &ForgeManager,
) -> Result<Action> {
    let event =
        PayloadParser::new(config.require_merge_commit_sha).parse(payload)?;
    let engine = ReleaseDecisionEngine::from_config(config)?;

    // Skip listing releases for events that can never change them
    if !engine.is_merged_into_default(&event) {
        return engine.decide(&event, None);
    }

    let latest = forge.latest_release().await?;
    let action = engine.decide(&event, latest.as_ref())?;

    match &action {
        Action::NoAction => {}
        Action::CreateRelease(req) => {
            debug!("creating draft release {}: {}", req.tag, req.body);
            forge.create_release(req.clone()).await?;
        }
        Action::AppendToRelease { record, body } => {
            debug!("appending to draft release {}", record.tag);
            forge
                .update_release(UpdateReleaseRequest::replace_body(
                    record,
                    body.clone(),
                ))
                .await?;
        }
    }

    Ok(action)
}

#[cfg(test)]
mod tests;
