//! Decides how a merged pull request changes the repository's releases.
//!
//! The engine is a pure function of the event and the latest release:
//!
//! - not a merge into the default branch: [`Action::NoAction`]
//! - no releases yet: create a draft tagged with the initial version
//! - latest release is a draft: append the note to its body
//! - latest release is published: create a draft with the patch bumped
//!
//! "Latest" is whatever the repository lists first; the engine does not
//! re-sort.
use log::*;

use crate::{
    config::Config,
    error::Result,
    forge::types::{CreateReleaseRequest, ReleaseRecord},
    release::{
        note::{append_note, format_note},
        version::SemVer,
    },
    webhook::payload::PullRequestEvent,
};

/// Pull request action that marks a PR as closed (merged or not).
pub const PR_CLOSED: &str = "closed";

/// Outcome of [`ReleaseDecisionEngine::decide`].
///
/// `NoAction` is a successful outcome, distinct from the errors `decide`
/// can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The event is not a merge into the default branch.
    NoAction,
    /// Start a new draft release.
    CreateRelease(CreateReleaseRequest),
    /// Replace the body of the existing draft `record` with `body`.
    AppendToRelease { record: ReleaseRecord, body: String },
}

#[derive(Debug, Clone)]
pub struct ReleaseDecisionEngine {
    default_branch: String,
    tag_prefix: String,
    initial_version: SemVer,
}

impl ReleaseDecisionEngine {
    pub fn new(
        default_branch: impl Into<String>,
        tag_prefix: impl Into<String>,
        initial_version: SemVer,
    ) -> Self {
        Self {
            default_branch: default_branch.into(),
            tag_prefix: tag_prefix.into(),
            initial_version,
        }
    }

    /// Build from configuration, failing if the initial version is not
    /// `major.minor.patch`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let initial_tag =
            format!("{}{}", config.tag_prefix, config.initial_version);
        let initial_version = SemVer::parse(&initial_tag, &config.tag_prefix)?;

        Ok(Self::new(
            config.default_branch.clone(),
            config.tag_prefix.clone(),
            initial_version,
        ))
    }

    /// True when the event is a pull request merged into the default branch.
    pub fn is_merged_into_default(&self, event: &PullRequestEvent) -> bool {
        event.action == PR_CLOSED
            && event.merged
            && event.base_ref == self.default_branch
    }

    /// Decide what to do with `latest`, the newest release if any.
    ///
    /// Fails with `InvalidVersion` when a new release has to be cut after a
    /// published release whose tag does not follow the prefix convention,
    /// or whose patch number cannot be incremented.
    pub fn decide(
        &self,
        event: &PullRequestEvent,
        latest: Option<&ReleaseRecord>,
    ) -> Result<Action> {
        if !self.is_merged_into_default(event) {
            info!(
                "PR not merged into default branch: action:{}, merged:{}, base:{}",
                event.action, event.merged, event.base_ref
            );
            return Ok(Action::NoAction);
        }

        let note = format_note(event);

        let action = match latest {
            None => {
                debug!("no releases found: starting at {}", self.initial_version);
                self.new_draft(self.initial_version, note)
            }
            Some(record) if record.is_draft => Action::AppendToRelease {
                record: record.clone(),
                body: append_note(&record.body, &note),
            },
            Some(record) => {
                let previous = SemVer::parse(&record.tag, &self.tag_prefix)?;
                debug!("latest release {} is published", record.tag);
                self.new_draft(previous.bump_patch()?, note)
            }
        };

        Ok(action)
    }

    fn new_draft(&self, version: SemVer, body: String) -> Action {
        let tag = version.to_tag(&self.tag_prefix);
        Action::CreateRelease(CreateReleaseRequest {
            title: tag.clone(),
            tag,
            body,
            draft: true,
        })
    }
}
