// --- File: crates/citabot_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level for `citabot*` targets (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file_prefix() -> String {
    "citabot.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            file_prefix: default_log_file_prefix(),
        }
    }
}

// --- Google Calendar Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GcalAuthMode {
    /// `token.json` written by the installed-app OAuth flow.
    #[default]
    AuthorizedUser,
    ServiceAccount,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    #[serde(default)]
    pub auth_mode: GcalAuthMode,
    pub credentials_path: Option<String>, // Mandatory
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

// --- Messenger Config ---
// Secrets are usually "secret_from_env" in the config file.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MessengerConfig {
    pub verify_token: String, // MESSENGER_VERIFY_TOKEN
    #[serde(default)]
    pub access_token: Option<String>, // MESSENGER_ACCESS_TOKEN, replies disabled when absent
    #[serde(default)]
    pub app_secret: Option<String>, // MESSENGER_APP_SECRET, signature check skipped when absent
    #[serde(default = "default_graph_api_base")]
    pub graph_api_base: String,
    #[serde(default = "default_graph_api_version")]
    pub graph_api_version: String,
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
}

// --- WhatsApp Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WhatsappConfig {
    pub verify_token: String, // WHATSAPP_VERIFY_TOKEN
    #[serde(default)]
    pub api_token: Option<String>, // WHATSAPP_API_TOKEN
    #[serde(default)]
    pub phone_number_id: Option<String>, // WHATSAPP_PHONE_NUMBER_ID
    #[serde(default)]
    pub app_secret: Option<String>, // WHATSAPP_APP_SECRET
    #[serde(default = "default_graph_api_base")]
    pub graph_api_base: String,
    #[serde(default = "default_graph_api_version")]
    pub graph_api_version: String,
}

fn default_graph_api_base() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_graph_api_version() -> String {
    "v19.0".to_string()
}

fn default_chunk_delay_ms() -> u64 {
    500
}

// --- Appointments Config ---
// Fixed event values emitted by the planner. Defaults match the canned
// appointment used by the webhook scenarios.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppointmentsConfig {
    pub time_zone: String,
    pub duration_minutes: i64,
    pub create_summary: String,
    pub create_start: String,
    pub modify_summary: String,
    pub modify_start: String,
    pub modify_event_id: String,
    pub cancel_event_id: String,
}

impl Default for AppointmentsConfig {
    fn default() -> Self {
        Self {
            time_zone: "America/Argentina/Buenos_Aires".to_string(),
            duration_minutes: 60,
            create_summary: "Cita agendada".to_string(),
            create_start: "2025-07-21T10:00:00-03:00".to_string(),
            modify_summary: "Cita modificada".to_string(),
            modify_start: "2025-07-21T11:00:00-03:00".to_string(),
            modify_event_id: "evento_a_modificar_id".to_string(),
            cancel_event_id: "evento_a_cancelar_id".to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_messenger: bool,
    #[serde(default)]
    pub use_whatsapp: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub messenger: Option<MessengerConfig>,
    #[serde(default)]
    pub whatsapp: Option<WhatsappConfig>,
    #[serde(default)]
    pub appointments: AppointmentsConfig,
}
