//! Implements the ReleaseRepository trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, models::repos::Release};
use secrecy::SecretString;

use crate::{
    config::RepoIdentifier,
    error::Result,
    forge::{
        traits::ReleaseRepository,
        types::{CreateReleaseRequest, ReleaseRecord, UpdateReleaseRequest},
    },
};

/// Number of releases requested per listing. Only the newest one is ever
/// consulted, the rest are kept for debug logging.
pub const DEFAULT_PAGE_SIZE: u8 = 10;

/// GitHub release repository using Octocrab for API interactions.
pub struct Github {
    repo: RepoIdentifier,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication.
    pub fn new(repo: RepoIdentifier, token: SecretString) -> Result<Self> {
        let instance = Octocrab::builder().personal_token(token).build()?;
        Ok(Self { repo, instance })
    }
}

impl From<Release> for ReleaseRecord {
    fn from(release: Release) -> Self {
        let title = release
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| release.tag_name.clone());

        Self {
            id: release.id.into_inner(),
            tag: release.tag_name,
            title,
            body: release.body.unwrap_or_default(),
            is_draft: release.draft,
        }
    }
}

#[async_trait]
impl ReleaseRepository for Github {
    fn repo_name(&self) -> String {
        self.repo.to_string()
    }

    async fn list_releases(&self) -> Result<Vec<ReleaseRecord>> {
        // GitHub lists releases newest first, drafts included for
        // authenticated callers with push access.
        let page = self
            .instance
            .repos(&self.repo.owner, &self.repo.name)
            .releases()
            .list()
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        let releases: Vec<ReleaseRecord> =
            page.items.into_iter().map(ReleaseRecord::from).collect();

        debug!(
            "listed releases for {}: {:?}",
            self.repo,
            releases.iter().map(|r| &r.tag).collect::<Vec<_>>()
        );

        Ok(releases)
    }

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<ReleaseRecord> {
        let release = self
            .instance
            .repos(&self.repo.owner, &self.repo.name)
            .releases()
            .create(&req.tag)
            .name(&req.title)
            .body(&req.body)
            .draft(req.draft)
            .send()
            .await?;

        debug!("created release {} for {}", release.tag_name, self.repo);

        Ok(release.into())
    }

    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<ReleaseRecord> {
        let release = self
            .instance
            .repos(&self.repo.owner, &self.repo.name)
            .releases()
            .update(req.id)
            .name(&req.title)
            .body(&req.body)
            .draft(req.draft)
            .send()
            .await?;

        debug!("updated release {} for {}", release.tag_name, self.repo);

        Ok(release.into())
    }
}
