//! Runtime settings for a calculator session.
//!
//! Nothing here is persisted: values come from command-line flags and fall
//! back to the defaults in [`consts`](crate::consts).

use crate::consts::{DEFAULT_COMPLETION_URL, DEFAULT_KEY_URL, DEFAULT_MODEL};

/// Endpoints and model used by one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Key-storage endpoint queried for the bearer token.
    pub key_url: String,
    /// Completion endpoint the expression is sent to.
    pub completion_url: String,
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_url: DEFAULT_KEY_URL.to_string(),
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Build settings, taking the default for every `None`.
    pub fn from_overrides(
        key_url: Option<String>,
        completion_url: Option<String>,
        model: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            key_url: key_url.unwrap_or(defaults.key_url),
            completion_url: completion_url.unwrap_or(defaults.completion_url),
            model: model.unwrap_or(defaults.model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_consts() {
        let settings = Settings::default();
        assert_eq!(settings.key_url, DEFAULT_KEY_URL);
        assert_eq!(settings.completion_url, DEFAULT_COMPLETION_URL);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn no_overrides_equals_default() {
        assert_eq!(Settings::from_overrides(None, None, None), Settings::default());
    }

    #[test]
    fn overrides_are_independent() {
        let settings =
            Settings::from_overrides(None, Some("http://localhost:9/v1".to_string()), None);
        assert_eq!(settings.key_url, DEFAULT_KEY_URL);
        assert_eq!(settings.completion_url, "http://localhost:9/v1");
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn model_override() {
        let settings = Settings::from_overrides(None, None, Some("gpt-4o".to_string()));
        assert_eq!(settings.model, "gpt-4o");
    }
}
