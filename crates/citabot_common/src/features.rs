//! Feature flag handling for the citabot application.
//!
//! ## Available Features
//!
//! - `gcal`: Google Calendar adapter
//! - `messenger`: Facebook Messenger webhook and Send API replies
//! - `whatsapp`: WhatsApp Cloud API webhook and replies
//!
//! Each integration is gated twice: at compile time with `#[cfg(feature = "...")]`
//! in the backend, and at runtime by its `use_*` flag plus a config section.

#[cfg(any(feature = "gcal", feature = "messenger", feature = "whatsapp"))]
use citabot_config::AppConfig;
#[cfg(any(feature = "gcal", feature = "messenger", feature = "whatsapp"))]
use std::sync::Arc;

/// A feature is enabled when its flag is set and its config section is present.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

#[cfg(feature = "gcal")]
pub fn is_gcal_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config.use_gcal, config.gcal.as_ref())
}

#[cfg(feature = "messenger")]
pub fn is_messenger_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config.use_messenger, config.messenger.as_ref())
}

#[cfg(feature = "whatsapp")]
pub fn is_whatsapp_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config.use_whatsapp, config.whatsapp.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_feature_enabled() {
        assert!(is_feature_enabled(true, Some(&())));
        assert!(!is_feature_enabled(true, None::<&()>));
        assert!(!is_feature_enabled(false, Some(&())));
    }

    #[cfg(feature = "gcal")]
    #[test]
    fn test_gcal_needs_section() {
        let mut config = AppConfig {
            use_gcal: true,
            ..Default::default()
        };
        assert!(!is_gcal_enabled(&Arc::new(config.clone())));
        config.gcal = Some(citabot_config::GcalConfig {
            auth_mode: Default::default(),
            credentials_path: Some("token.json".to_string()),
            calendar_id: "primary".to_string(),
        });
        assert!(is_gcal_enabled(&Arc::new(config)));
    }
}
