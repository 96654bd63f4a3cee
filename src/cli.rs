//! CLI argument parsing and configuration resolution.
use std::{env, path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use log::*;

use crate::{
    config::{
        Config, ConfigBuilder, DEFAULT_CONFIG_FILE, FileConfig, RepoIdentifier,
    },
    error::{ReleaseNotesError, Result},
    secret::{
        Base64EnvSecretProvider, DEFAULT_TOKEN_VAR, DEFAULT_WEBHOOK_SECRET_VAR,
        EnvSecretProvider, FileSecretProvider, SecretProvider,
    },
};

/// Default address the webhook server binds to.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
/// Default directory for file based secrets.
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

/// Where secrets are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SecretSource {
    /// Plain environment variables.
    #[default]
    Env,
    /// Base64 encoded environment variables.
    Base64Env,
    /// Files named after the variable inside --secrets-dir.
    File,
}

/// Webhook server keeping a draft GitHub release up to date with merged
/// pull requests.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "")]
    /// GitHub repository (owner/name or URL). Falls back to GITHUB_REPO env var.
    pub repo: String,

    #[arg(long)]
    /// Path to a TOML config file.
    pub config: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    /// Address to listen on for webhook deliveries.
    pub listen: String,

    #[arg(long)]
    /// Branch whose merges are recorded (default: master).
    pub default_branch: Option<String>,

    #[arg(long)]
    /// Prefix prepended to versions in release tags (default: v).
    pub tag_prefix: Option<String>,

    #[arg(long)]
    /// Version of the first release (default: 0.0.1).
    pub initial_version: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Reject payloads without pull_request.merge_commit_sha.
    pub require_merge_commit_sha: bool,

    #[arg(long)]
    /// Timeout in seconds for each GitHub API call (default: 10).
    pub timeout_secs: Option<u64>,

    #[arg(long, value_enum, default_value_t = SecretSource::Env)]
    /// Where the webhook secret and access token are read from.
    pub secret_source: SecretSource,

    #[arg(long, default_value = DEFAULT_SECRETS_DIR)]
    /// Directory holding secret files when --secret-source=file.
    pub secrets_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_WEBHOOK_SECRET_VAR)]
    /// Name of the webhook secret.
    pub webhook_secret_var: String,

    #[arg(long, default_value = DEFAULT_TOKEN_VAR)]
    /// Name of the GitHub access token secret.
    pub token_var: String,

    #[arg(long, default_value_t = false)]
    /// Log release changes without making them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Secret provider selected by --secret-source.
    pub fn secret_provider(&self) -> Box<dyn SecretProvider> {
        match self.secret_source {
            SecretSource::Env => Box::new(EnvSecretProvider),
            SecretSource::Base64Env => Box::new(Base64EnvSecretProvider),
            SecretSource::File => {
                Box::new(FileSecretProvider::new(self.secrets_dir.clone()))
            }
        }
    }

    /// Load the config file named by --config, or the default file name in
    /// the working directory.
    pub fn file_config(&self) -> Result<FileConfig> {
        match &self.config {
            Some(path) if !path.exists() => {
                Err(ReleaseNotesError::invalid_config(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => FileConfig::load(path),
            None => FileConfig::load(&PathBuf::from(DEFAULT_CONFIG_FILE)),
        }
    }

    /// Resolve the runtime configuration: flags win over the config file,
    /// which wins over built-in defaults.
    pub fn build_config(
        &self,
        file: FileConfig,
        secrets: &dyn SecretProvider,
    ) -> Result<Config> {
        let mut repo = self.repo.clone();

        if repo.is_empty()
            && let Some(file_repo) = file.repo.clone()
        {
            repo = file_repo;
        }

        if repo.is_empty()
            && let Ok(env_repo) = env::var("GITHUB_REPO")
        {
            repo = env_repo;
        }

        if repo.is_empty() {
            return Err(ReleaseNotesError::invalid_config(
                "must set a github repository",
            ));
        }

        let repo: RepoIdentifier = repo.parse()?;
        let secret = secrets.secret(&self.webhook_secret_var)?;

        let mut builder = ConfigBuilder::default();
        builder.secret(secret).repo(repo);

        if let Some(branch) =
            self.default_branch.clone().or(file.default_branch)
        {
            builder.default_branch(branch);
        }

        if let Some(prefix) = self.tag_prefix.clone().or(file.tag_prefix) {
            builder.tag_prefix(prefix);
        }

        if let Some(version) =
            self.initial_version.clone().or(file.initial_version)
        {
            builder.initial_version(version);
        }

        if let Some(secs) = self.timeout_secs.or(file.timeout_secs) {
            builder.forge_timeout(Duration::from_secs(secs));
        }

        builder.require_merge_commit_sha(
            self.require_merge_commit_sha
                || file.require_merge_commit_sha.unwrap_or(false),
        );
        builder.dry_run(self.dry_run || file.dry_run.unwrap_or(false));

        let config = builder
            .build()
            .map_err(|err| ReleaseNotesError::invalid_config(err.to_string()))?;

        config.validate()?;

        debug!("resolved configuration: {config:?}");

        Ok(config)
    }
}
