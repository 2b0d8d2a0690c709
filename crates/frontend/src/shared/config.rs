//! Runtime configuration of the frontend
//!
//! Read once at start-up from `data-*` attributes on `<body>`:
//! - `data-api-base`: prefix for REST calls (empty = same origin)
//! - `data-request-timeout-ms`: abort REST calls after this many milliseconds
//! - `data-log-level`: `error` | `warn` | `info` | `debug` | `trace`

use once_cell::sync::OnceCell;
use std::str::FromStr;

pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub request_timeout_ms: u32,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            log_level: log::Level::Debug,
        }
    }
}

impl AppConfig {
    /// Build config from an attribute lookup; missing or malformed values
    /// fall back to defaults.
    pub fn from_attributes(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base = get("data-api-base")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);

        let request_timeout_ms = get("data-request-timeout-ms")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.request_timeout_ms);

        let log_level = get("data-log-level")
            .and_then(|v| log::Level::from_str(v.trim()).ok())
            .unwrap_or(defaults.log_level);

        Self {
            api_base,
            request_timeout_ms,
            log_level,
        }
    }

    /// Read config from the current document's `<body>`
    pub fn from_document() -> Self {
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        match body {
            Some(body) => Self::from_attributes(|name| body.get_attribute(name)),
            None => Self::default(),
        }
    }
}

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Install the config; later calls are ignored
pub fn init(config: AppConfig) {
    let _ = CONFIG.set(config);
}

/// Current config (defaults if `init` was never called)
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_attributes_missing() {
        assert_eq!(AppConfig::from_attributes(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn test_reads_attributes() {
        let cfg = AppConfig::from_attributes(lookup(&[
            ("data-api-base", "https://loja.example.com/"),
            ("data-request-timeout-ms", "5000"),
            ("data-log-level", "warn"),
        ]));
        assert_eq!(cfg.api_base, "https://loja.example.com");
        assert_eq!(cfg.request_timeout_ms, 5000);
        assert_eq!(cfg.log_level, log::Level::Warn);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let cfg = AppConfig::from_attributes(lookup(&[
            ("data-request-timeout-ms", "0"),
            ("data-log-level", "loud"),
        ]));
        assert_eq!(cfg.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        assert_eq!(cfg.log_level, log::Level::Debug);
    }
}
