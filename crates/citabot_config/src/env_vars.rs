//! Environment variable handling for the citabot application.
//!
//! Configuration values follow the `CITABOT__SECTION__KEY` pattern; secrets
//! follow `CITABOT_SECRET_SECTION_KEY` with a fallback to the plain
//! `SECTION_KEY` names Meta and Google tooling usually document
//! (e.g. `MESSENGER_VERIFY_TOKEN`, `WHATSAPP_API_TOKEN`).

use std::env;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "CITABOT";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "CITABOT_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker string that is replaced with an environment variable value.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"server.host"` becomes `"CITABOT__SERVER__HOST"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"messenger.verify_token"` becomes `"CITABOT_SECRET_MESSENGER_VERIFY_TOKEN"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a path to its unprefixed environment variable name
///
/// `"whatsapp.phone_number_id"` becomes `"WHATSAPP_PHONE_NUMBER_ID"`.
pub fn legacy_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Check if a path is a secret path
///
/// Paths containing "secret", "key", "password" or "token" are considered secret.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret")
        || path_lower.contains("key")
        || path_lower.contains("password")
        || path_lower.contains("token")
}

/// Get an environment variable for a path
///
/// Secret paths look up the `CITABOT_SECRET_*` name first, other paths the
/// `CITABOT__*` name; both fall back to the unprefixed name.
pub fn get_env_var(path: &str) -> Option<String> {
    let primary = if is_secret_path(path) {
        secret_path_to_env_var(path)
    } else {
        config_path_to_env_var(path)
    };

    env::var(&primary)
        .or_else(|_| env::var(legacy_path_to_env_var(path)))
        .ok()
}

/// Inject environment variables into a JSON value
///
/// Walks the value and replaces every `"secret_from_env"` string with the
/// environment variable named after its path. Returns the paths that could
/// not be resolved.
pub fn inject_env_vars(value: &mut serde_json::Value) -> Vec<String> {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value, missing: &mut Vec<String>) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v, missing);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match get_env_var(&path_str) {
                    Some(env_val) => *s = env_val,
                    None => {
                        warn!("env var for {} not found", path_str);
                        missing.push(path_str);
                    }
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(vec![], value, &mut missing);
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(config_path_to_env_var("server.host"), "CITABOT__SERVER__HOST");
        assert_eq!(
            config_path_to_env_var("gcal.calendar_id"),
            "CITABOT__GCAL__CALENDAR_ID"
        );
    }

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("messenger.verify_token"),
            "CITABOT_SECRET_MESSENGER_VERIFY_TOKEN"
        );
        assert_eq!(
            secret_path_to_env_var("whatsapp.app_secret"),
            "CITABOT_SECRET_WHATSAPP_APP_SECRET"
        );
    }

    #[test]
    fn test_legacy_path_to_env_var() {
        assert_eq!(
            legacy_path_to_env_var("messenger.access_token"),
            "MESSENGER_ACCESS_TOKEN"
        );
        assert_eq!(
            legacy_path_to_env_var("whatsapp.phone_number_id"),
            "WHATSAPP_PHONE_NUMBER_ID"
        );
        assert_eq!(legacy_path_to_env_var("port"), "PORT");
    }

    #[test]
    fn test_is_secret_path() {
        assert!(is_secret_path("messenger.verify_token"));
        assert!(is_secret_path("whatsapp.api_token"));
        assert!(is_secret_path("messenger.app_secret"));
        assert!(!is_secret_path("server.host"));
        assert!(!is_secret_path("whatsapp.phone_number_id"));
    }

    #[test]
    fn test_inject_env_vars_replaces_markers() {
        env::set_var("CITABOT_SECRET_INJECTTEST_API_TOKEN", "tok-123");
        env::set_var("INJECTTEST_REGION", "sa-east");

        let mut value = json!({
            "injecttest": {
                "api_token": "secret_from_env",
                "region": "secret_from_env",
                "absent_token": "secret_from_env",
                "plain": "untouched"
            }
        });

        let missing = inject_env_vars(&mut value);

        assert_eq!(value["injecttest"]["api_token"], "tok-123");
        assert_eq!(value["injecttest"]["region"], "sa-east");
        assert_eq!(value["injecttest"]["plain"], "untouched");
        assert_eq!(value["injecttest"]["absent_token"], SECRET_MARKER);
        assert_eq!(missing, vec!["injecttest.absent_token".to_string()]);
    }
}
