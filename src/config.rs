//! Runtime configuration and loading of `auto-release-notes.toml` files.
//!
//! Configuration is resolved once at startup and then shared read-only
//! between webhook invocations. Precedence is CLI flag, then config file,
//! then the defaults below. The webhook secret never comes from the file.
use std::{fmt, path::Path, str::FromStr, time::Duration};

use derive_builder::Builder;
use log::*;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    error::{ReleaseNotesError, Result},
    release::version::SemVer,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "auto-release-notes.toml";
/// Merges into this branch trigger release note updates.
pub const DEFAULT_BRANCH: &str = "master";
/// Literal prepended to versions to form release tags.
pub const DEFAULT_TAG_PREFIX: &str = "v";
/// Version of the first release when the repository has none.
pub const DEFAULT_INITIAL_VERSION: &str = "0.0.1";
/// Upper bound for a single release repository call.
pub const DEFAULT_FORGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Repository a webhook deployment manages, as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentifier {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoIdentifier {
    type Err = ReleaseNotesError;

    /// Accepts `owner/name` or a `http(s)://host/owner/name(.git)` URL.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches('/');

        let path = match trimmed.split_once("://") {
            Some((scheme, rest)) => {
                if scheme != "http" && scheme != "https" {
                    return Err(ReleaseNotesError::invalid_config(format!(
                        "only http and https schemes are supported for repo urls: {s}"
                    )));
                }
                // drop the host
                rest.split_once('/').map(|(_, path)| path).unwrap_or("")
            }
            None => trimmed,
        };

        let path = path.strip_suffix(".git").unwrap_or(path);

        match path.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ReleaseNotesError::invalid_config(format!(
                "repository must be in owner/name form: {s}"
            ))),
        }
    }
}

impl fmt::Display for RepoIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Read-only configuration consulted by the webhook handler.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    /// Shared secret used to sign webhook deliveries.
    pub secret: SecretString,
    /// Repository whose releases are maintained.
    pub repo: RepoIdentifier,
    #[builder(default = "DEFAULT_BRANCH.to_string()")]
    pub default_branch: String,
    #[builder(default = "DEFAULT_TAG_PREFIX.to_string()")]
    pub tag_prefix: String,
    #[builder(default = "DEFAULT_INITIAL_VERSION.to_string()")]
    pub initial_version: String,
    /// Treat a missing `pull_request.merge_commit_sha` as a malformed payload.
    #[builder(default)]
    pub require_merge_commit_sha: bool,
    #[builder(default = "DEFAULT_FORGE_TIMEOUT")]
    pub forge_timeout: Duration,
    /// Log release mutations instead of performing them.
    #[builder(default)]
    pub dry_run: bool,
}

impl Config {
    /// Reject configuration that could never handle a webhook.
    pub fn validate(&self) -> Result<()> {
        if self.secret.expose_secret().is_empty() {
            return Err(ReleaseNotesError::invalid_config(
                "webhook secret must not be empty",
            ));
        }

        if self.default_branch.trim().is_empty() {
            return Err(ReleaseNotesError::invalid_config(
                "default branch must not be empty",
            ));
        }

        if self.forge_timeout.is_zero() {
            return Err(ReleaseNotesError::invalid_config(
                "forge timeout must be greater than zero",
            ));
        }

        let initial = format!("{}{}", self.tag_prefix, self.initial_version);
        SemVer::parse(&initial, &self.tag_prefix).map_err(|_| {
            ReleaseNotesError::invalid_config(format!(
                "initial version is not major.minor.patch: {}",
                self.initial_version
            ))
        })?;

        Ok(())
    }
}

/// Optional settings read from `auto-release-notes.toml`.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub repo: Option<String>,
    pub default_branch: Option<String>,
    pub tag_prefix: Option<String>,
    pub initial_version: Option<String>,
    pub require_merge_commit_sha: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub dry_run: Option<bool>,
}

impl FileConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path`, or the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "no configuration found at {}: using default",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!("loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }
}
