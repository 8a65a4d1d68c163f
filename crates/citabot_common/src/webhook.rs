// --- File: crates/citabot_common/src/webhook.rs ---
//! Meta webhook plumbing shared by the Messenger and WhatsApp channels:
//! the `hub.*` subscription handshake and `X-Hub-Signature-256` validation.

use axum::http::HeaderMap;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;
use tracing::{debug, warn};

use citabot_config::env_vars::SECRET_MARKER;

use crate::error::{forbidden, CitabotError};

/// Header carrying `sha256=<hex hmac of the raw body>`.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Response body acknowledging an accepted delivery.
pub const EVENT_RECEIVED: &str = "EVENT_RECEIVED";

type HmacSha256 = Hmac<Sha256>;

/// Query parameters of the subscription handshake.
#[derive(Debug, Default, Deserialize)]
pub struct HubQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("hub.mode or hub.verify_token missing")]
    MissingParameters,
    #[error("verify token mismatch")]
    TokenMismatch,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing X-Hub-Signature-256 header")]
    MissingHeader,
    #[error("malformed X-Hub-Signature-256 header")]
    MalformedHeader,
    #[error("invalid app secret for HMAC")]
    InvalidSecret,
    #[error("signature mismatch")]
    Mismatch,
}

impl From<SignatureError> for CitabotError {
    fn from(err: SignatureError) -> Self {
        forbidden(err)
    }
}

/// Checks the handshake and returns the challenge to echo back.
///
/// A missing challenge is echoed as an empty body. An empty configured token,
/// or one still holding the `secret_from_env` marker, never verifies.
pub fn verify_subscription(
    query: &HubQuery,
    expected_token: &str,
) -> Result<String, SubscriptionError> {
    let (mode, token) = match (query.mode.as_deref(), query.verify_token.as_deref()) {
        (Some(mode), Some(token)) => (mode, token),
        _ => return Err(SubscriptionError::MissingParameters),
    };

    if expected_token.is_empty() || expected_token == SECRET_MARKER {
        warn!("No verify token configured, rejecting webhook subscription");
        return Err(SubscriptionError::TokenMismatch);
    }

    if mode == "subscribe" && constant_time_eq(token.as_bytes(), expected_token.as_bytes()) {
        Ok(query.challenge.clone().unwrap_or_default())
    } else {
        Err(SubscriptionError::TokenMismatch)
    }
}

/// Hex HMAC-SHA256 of `payload` keyed with `app_secret`.
pub fn compute_signature(app_secret: &str, payload: &[u8]) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|_| SignatureError::InvalidSecret)?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Validates a `sha256=<hex>` header value against the raw body.
pub fn verify_signature(
    app_secret: &str,
    payload: &[u8],
    header: Option<&str>,
) -> Result<(), SignatureError> {
    let header = header.ok_or(SignatureError::MissingHeader)?;
    let provided = header
        .trim()
        .strip_prefix("sha256=")
        .ok_or(SignatureError::MalformedHeader)?;

    let expected = compute_signature(app_secret, payload)?;
    if constant_time_eq(expected.as_bytes(), provided.to_ascii_lowercase().as_bytes()) {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Signature gate for webhook handlers.
///
/// Without a configured app secret (or with an unresolved `secret_from_env`
/// marker) the check is skipped.
pub fn check_signature(
    app_secret: Option<&str>,
    headers: &HeaderMap,
    payload: &[u8],
) -> Result<(), CitabotError> {
    let Some(secret) = app_secret.filter(|s| !s.is_empty() && *s != SECRET_MARKER) else {
        warn!("No app secret configured, skipping webhook signature check");
        return Ok(());
    };

    let header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    verify_signature(secret, payload, header)?;
    debug!("Webhook signature verified");
    Ok(())
}
