// File: crates/citabot_gcal/src/auth.rs
use citabot_config::{GcalAuthMode, GcalConfig};
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{
        authorized_user::AuthorizedUserSecret, read_service_account_key,
        AuthorizedUserAuthenticator, ServiceAccountAuthenticator,
    },
    CalendarHub,
};
use serde::Deserialize;
use std::{error::Error, path::Path};
use tracing::info;

type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

const AUTHORIZED_USER_TYPE: &str = "authorized_user";

/// Fields shared by the installed-app `token.json` and the gcloud ADC file.
/// Only the latter carries `type`; everything else is ignored.
#[derive(Debug, Deserialize)]
struct StoredUserCredentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(rename = "type", default)]
    key_type: Option<String>,
}

/// Parses authorized-user credentials, with or without a `type` field.
pub fn parse_authorized_user(json: &[u8]) -> Result<AuthorizedUserSecret, serde_json::Error> {
    let stored: StoredUserCredentials = serde_json::from_slice(json)?;
    Ok(AuthorizedUserSecret {
        client_id: stored.client_id,
        client_secret: stored.client_secret,
        refresh_token: stored.refresh_token,
        key_type: stored
            .key_type
            .unwrap_or_else(|| AUTHORIZED_USER_TYPE.to_string()),
    })
}

async fn read_authorized_user(path: &Path) -> Result<AuthorizedUserSecret, Box<dyn Error + Send + Sync>> {
    let contents = tokio::fs::read(path).await?;
    parse_authorized_user(&contents)
        .map_err(|e| format!("Bad authorized user credentials in {}: {}", path.display(), e).into())
}

/// Builds the authenticated calendar client from the stored credentials file.
///
/// `authorized_user` expects the `token.json` written by Google's installed-app
/// flow (client id, client secret, refresh token); `service_account` expects a
/// service-account key. Token refresh is left to `yup-oauth2`.
pub async fn create_calendar_hub(
    config: &GcalConfig,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let credentials_path = config
        .credentials_path
        .as_deref()
        .ok_or("Missing credentials_path in GcalConfig")?;
    let path = Path::new(credentials_path);

    let auth = match config.auth_mode {
        GcalAuthMode::AuthorizedUser => {
            let secret = read_authorized_user(path).await?;
            AuthorizedUserAuthenticator::builder(secret).build().await?
        }
        GcalAuthMode::ServiceAccount => {
            let sa_key = read_service_account_key(path).await?;
            ServiceAccountAuthenticator::builder(sa_key).build().await?
        }
    };
    info!(
        "Google Calendar credentials loaded ({:?}) from {}",
        config.auth_mode, credentials_path
    );

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(CalendarHub::new(client, auth))
}
