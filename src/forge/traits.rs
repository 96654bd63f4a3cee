//! Traits related to the remote release repository
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::types::{CreateReleaseRequest, ReleaseRecord, UpdateReleaseRequest},
};

/// Release operations consumed by the webhook handler.
///
/// Implementations must return releases newest first; callers treat index 0
/// as the latest release without re-sorting.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseRepository: Send + Sync {
    fn repo_name(&self) -> String;
    async fn list_releases(&self) -> Result<Vec<ReleaseRecord>>;
    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<ReleaseRecord>;
    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<ReleaseRecord>;
}
