//! Manager that wraps release repository implementations
use std::{future::Future, time::Duration};

use log::*;

use crate::{
    error::{ReleaseNotesError, Result},
    forge::{
        traits::ReleaseRepository,
        types::{CreateReleaseRequest, ReleaseRecord, UpdateReleaseRequest},
    },
};

/// Bounds every repository call by a timeout and honors dry-run mode.
///
/// Calls are never retried here; a failed delivery is retried by GitHub
/// redelivering the webhook.
pub struct ForgeManager {
    forge: Box<dyn ReleaseRepository>,
    timeout: Duration,
    dry_run: bool,
}

impl ForgeManager {
    pub fn new(
        forge: Box<dyn ReleaseRepository>,
        timeout: Duration,
        dry_run: bool,
    ) -> Self {
        Self {
            forge,
            timeout,
            dry_run,
        }
    }

    pub fn repo_name(&self) -> String {
        self.forge.repo_name()
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    "{operation} on {} did not complete within {:?}",
                    self.repo_name(),
                    self.timeout
                );
                Err(ReleaseNotesError::Timeout(self.timeout))
            }
        }
    }

    pub async fn list_releases(&self) -> Result<Vec<ReleaseRecord>> {
        self.bounded("list_releases", self.forge.list_releases())
            .await
    }

    /// Most recently created release, as ordered by the repository.
    pub async fn latest_release(&self) -> Result<Option<ReleaseRecord>> {
        let releases = self.list_releases().await?;
        debug!(
            "found {} releases for {}",
            releases.len(),
            self.repo_name()
        );
        Ok(releases.into_iter().next())
    }

    pub async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<ReleaseRecord> {
        if self.dry_run {
            warn!("dry_run: would create release: req: {:#?}", req);
            return Ok(ReleaseRecord {
                id: 0,
                tag: req.tag,
                title: req.title,
                body: req.body,
                is_draft: req.draft,
            });
        }

        info!("creating release {} on {}", req.tag, self.repo_name());
        self.bounded("create_release", self.forge.create_release(req))
            .await
    }

    pub async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<ReleaseRecord> {
        if self.dry_run {
            warn!("dry_run: would update release: req: {:#?}", req);
            return Ok(ReleaseRecord {
                id: req.id,
                tag: req.tag,
                title: req.title,
                body: req.body,
                is_draft: req.draft,
            });
        }

        info!("updating release {} on {}", req.tag, self.repo_name());
        self.bounded("update_release", self.forge.update_release(req))
            .await
    }
}
