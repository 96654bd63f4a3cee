//! GitHub webhook signature verification using HMAC-SHA1.
//!
//! GitHub signs each delivery with the shared webhook secret and sends the
//! result in the `X-Hub-Signature` header as `sha1=<hex>`. Verification is
//! the first step of handling a delivery and runs on the raw body bytes,
//! before any parsing.
use hmac::{Hmac, Mac};
use log::*;
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use subtle::ConstantTimeEq;

use crate::{
    error::{ReleaseNotesError, Result},
    webhook::request::{SIGNATURE_HEADER, WebhookRequest},
};

type HmacSha1 = Hmac<Sha1>;

/// The only method GitHub delivers webhooks with.
pub const ALLOWED_METHOD: &str = "POST";

/// Computes the lowercase hex HMAC-SHA1 digest of `payload`.
pub fn compute_digest(payload: &[u8], secret: &[u8]) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Formats a digest as a GitHub-style header value.
pub fn format_signature_header(digest: &str) -> String {
    format!("sha1={digest}")
}

/// Splits `<algorithm>=<hexdigest>` on the first `=`.
///
/// Returns `None` when there is no `=`, which covers the empty header.
pub fn split_signature_header(header: &str) -> Option<(&str, &str)> {
    header.split_once('=')
}

/// Validates method and signature of inbound webhook requests.
pub struct SignatureVerifier {
    secret: SecretString,
}

impl SignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Succeeds only for a POST whose signature header digest equals the
    /// HMAC-SHA1 of the raw body keyed by the shared secret.
    ///
    /// The algorithm label before `=` is not inspected; GitHub only sends
    /// `sha1` in this header.
    pub fn verify(&self, request: &WebhookRequest) -> Result<()> {
        check_method(request.method())?;

        let header = request.header(SIGNATURE_HEADER).unwrap_or_default();

        let Some((_, provided)) = split_signature_header(header) else {
            return Err(ReleaseNotesError::MalformedSignature(
                header.to_string(),
            ));
        };

        let computed =
            compute_digest(request.body(), self.secret.expose_secret().as_bytes());

        // Constant-time; unequal lengths compare unequal.
        let matches: bool =
            computed.as_bytes().ct_eq(provided.as_bytes()).into();

        if !matches {
            return Err(ReleaseNotesError::SignatureMismatch(header.to_string()));
        }

        debug!("webhook signature verified");
        Ok(())
    }
}

fn check_method(method: &str) -> Result<()> {
    if method != ALLOWED_METHOD {
        return Err(ReleaseNotesError::MethodNotAllowed(method.to_string()));
    }
    Ok(())
}
