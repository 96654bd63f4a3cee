//! Secret retrieval for the webhook secret and the GitHub access token.
//!
//! Secrets are resolved once at startup through a [`SecretProvider`], so the
//! handler never reaches into the environment itself.
use std::{env, path::PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use log::*;
use secrecy::SecretString;

use crate::error::{ReleaseNotesError, Result};

/// Default variable holding the webhook secret.
pub const DEFAULT_WEBHOOK_SECRET_VAR: &str = "GITHUB_WEBHOOK_SECRET";
/// Default variable holding the GitHub access token.
pub const DEFAULT_TOKEN_VAR: &str = "GITHUB_ACCESS_TOKEN";

/// Looks up a named secret.
pub trait SecretProvider: Send + Sync {
    fn secret(&self, name: &str) -> Result<SecretString>;
}

/// Reads secrets verbatim from environment variables.
#[derive(Debug, Default, Clone)]
pub struct EnvSecretProvider;

impl SecretProvider for EnvSecretProvider {
    fn secret(&self, name: &str) -> Result<SecretString> {
        read_env(name).map(SecretString::from)
    }
}

/// Reads base64 encoded secrets from environment variables.
#[derive(Debug, Default, Clone)]
pub struct Base64EnvSecretProvider;

impl SecretProvider for Base64EnvSecretProvider {
    fn secret(&self, name: &str) -> Result<SecretString> {
        let encoded = read_env(name)?;
        decode_base64(name, &encoded)
    }
}

fn decode_base64(name: &str, encoded: &str) -> Result<SecretString> {
    let decoded = STANDARD.decode(encoded.trim()).map_err(|err| {
        ReleaseNotesError::secret(format!("{name} is not valid base64: {err}"))
    })?;

    let value = String::from_utf8(decoded).map_err(|_| {
        ReleaseNotesError::secret(format!("{name} is not valid UTF-8"))
    })?;

    non_empty(name, value)
}

/// Reads secrets from files named after the secret inside `dir`, as
/// mounted by container orchestrators.
#[derive(Debug, Clone)]
pub struct FileSecretProvider {
    dir: PathBuf,
}

impl FileSecretProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SecretProvider for FileSecretProvider {
    fn secret(&self, name: &str) -> Result<SecretString> {
        let path = self.dir.join(name);
        debug!("reading secret {name} from {}", path.display());

        let content = std::fs::read_to_string(&path).map_err(|err| {
            ReleaseNotesError::secret(format!(
                "failed to read {}: {err}",
                path.display()
            ))
        })?;

        non_empty(name, content.trim_end().to_string())
    }
}

fn read_env(name: &str) -> Result<String> {
    let value = env::var(name).map_err(|_| {
        ReleaseNotesError::secret(format!("environment variable {name} is not set"))
    })?;
    if value.is_empty() {
        return Err(ReleaseNotesError::secret(format!("{name} is empty")));
    }
    Ok(value)
}

fn non_empty(name: &str, value: String) -> Result<SecretString> {
    if value.is_empty() {
        return Err(ReleaseNotesError::secret(format!("{name} is empty")));
    }
    Ok(SecretString::from(value))
}
