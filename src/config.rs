use std::env;
use tracing::{info, warn};

// These defaults apply when the environment does not override them.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_VAR: &str = "MYTASKS_API_URL";
pub const DISABLE_VALIDATION_VAR: &str = "MYTASKS_DISABLE_VALIDATION";

/// Client configuration: where the backend lives and whether forms are
/// validated before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    /// `false` is the pass-through mode: every form submits as typed and the
    /// server's 422 answers are the only field errors.
    pub validation: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            validation: true,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: &str, validation: bool) -> Self {
        Self {
            api_url: normalize_url(api_url),
            validation,
        }
    }

    /// Reads the process environment (native tools and tests).
    pub fn from_env() -> Self {
        Self::from_values(
            var(API_URL_VAR).as_deref(),
            var(DISABLE_VALIDATION_VAR).as_deref(),
        )
    }

    /// Reads values baked in at compile time (the WASM bundle has no process
    /// environment).
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("MYTASKS_API_URL"),
            option_env!("MYTASKS_DISABLE_VALIDATION"),
        )
    }

    fn from_values(api_url: Option<&str>, disable_validation: Option<&str>) -> Self {
        let api_url = match api_url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => url,
            None => {
                info!("{API_URL_VAR} not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL
            }
        };

        let validation = !disable_validation.is_some_and(is_truthy);
        if !validation {
            warn!("client-side validation disabled, forms submit unchecked");
        }

        Self::new(api_url, validation)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_values(None, None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn trims_trailing_slash() {
        let config = ClientConfig::from_values(Some("https://api.example.com/api/"), None);
        assert_eq!(config.api_url, "https://api.example.com/api");
    }

    #[test]
    fn blank_url_falls_back() {
        let config = ClientConfig::from_values(Some("   "), None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn validation_flag_parsing() {
        for on in ["1", "true", "TRUE", " yes "] {
            assert!(!ClientConfig::from_values(None, Some(on)).validation, "{on}");
        }
        for off in ["0", "false", "", "nope"] {
            assert!(ClientConfig::from_values(None, Some(off)).validation, "{off}");
        }
    }
}
