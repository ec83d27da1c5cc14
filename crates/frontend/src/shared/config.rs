//! Application configuration
//!
//! An embedded TOML document provides the defaults. The API base URL can be
//! overridden per browser through local storage, which is handy when one
//! build is pointed at several backends.

use once_cell::unsync::OnceCell;
use serde::Deserialize;

const API_BASE_OVERRIDE_KEY: &str = "app_api_base_url";

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 8080

[ui]
page_size = 20
toast_timeout_ms = 4000
inventory_poll_ms = 15000
"#;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Empty means "same host as the page, on `port`".
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_toast_timeout")]
    pub toast_timeout_ms: u32,
    #[serde(default = "default_poll")]
    pub inventory_poll_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            toast_timeout_ms: default_toast_timeout(),
            inventory_poll_ms: default_poll(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_page_size() -> u32 {
    20
}

fn default_toast_timeout() -> u32 {
    4000
}

fn default_poll() -> u32 {
    15000
}

pub fn parse_config(source: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str(source)?)
}

/// Load the embedded configuration and apply the local-storage override.
pub fn load_config() -> AppConfig {
    let mut config = match parse_config(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Embedded configuration is invalid: {}", e);
            AppConfig {
                api: ApiConfig {
                    base_url: String::new(),
                    port: default_port(),
                },
                ui: UiConfig::default(),
            }
        }
    };

    if let Some(url) = read_override() {
        log::info!("Using API base URL override: {}", url);
        config.api.base_url = url;
    }
    config
}

fn read_override() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let value = storage.get_item(API_BASE_OVERRIDE_KEY).ok()??;
    let trimmed = value.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

thread_local! {
    static CONFIG: OnceCell<AppConfig> = OnceCell::new();
}

/// Process-wide configuration, loaded on first use.
pub fn app_config() -> AppConfig {
    CONFIG.with(|cell| cell.get_or_init(load_config).clone())
}

impl ApiConfig {
    /// Resolve the base URL given the page's protocol and host.
    pub fn resolve_base(&self, protocol: &str, hostname: &str) -> String {
        let configured = self.base_url.trim().trim_end_matches('/');
        if !configured.is_empty() {
            return configured.to_string();
        }
        format!("{}//{}:{}", protocol, hostname, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.ui.page_size, 20);
        assert_eq!(config.ui.inventory_poll_ms, 15000);
    }

    #[test]
    fn ui_section_is_optional() {
        let config = parse_config("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn base_url_resolution() {
        let api = ApiConfig {
            base_url: String::new(),
            port: 8080,
        };
        assert_eq!(api.resolve_base("https:", "ops.example"), "https://ops.example:8080");

        let api = ApiConfig {
            base_url: "https://api.example/".into(),
            port: 8080,
        };
        assert_eq!(api.resolve_base("http:", "localhost"), "https://api.example");
    }
}
