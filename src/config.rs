use anyhow::{bail, Context, Result};
use std::fmt;

pub const DEFAULT_API_VERSION: &str = "v22.0";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Application configuration, loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    // ── Server ──────────────────────────────────────────────────────────
    pub host: String,
    pub port: u16,

    // ── Meta app credentials (only the auth route needs them) ───────────
    pub fb_app_id: Option<String>,
    pub fb_app_secret: Option<String>,

    // ── Graph API ───────────────────────────────────────────────────────
    pub api_version: String,
    pub graph_base_url: url::Url,
    /// Fetch the business/WABA/phone-number tree after a code exchange.
    pub fetch_business_assets: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let graph_base_url = var("FB_GRAPH_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.into());

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: var("PORT")
                .unwrap_or_else(|| "8000".into())
                .parse()
                .context("Invalid PORT")?,

            fb_app_id: var("FB_APP_ID"),
            fb_app_secret: var("FB_APP_SECRET"),

            api_version: var("FB_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.into()),
            graph_base_url: url::Url::parse(&graph_base_url)
                .with_context(|| format!("Invalid FB_GRAPH_BASE_URL: {graph_base_url}"))?,
            fetch_business_assets: match var("FB_FETCH_BUSINESS_ASSETS") {
                Some(v) => parse_bool(&v).context("Invalid FB_FETCH_BUSINESS_ASSETS")?,
                None => true,
            },
        })
    }

    /// App id and secret, if both are configured.
    pub fn app_credentials(&self) -> Option<(&str, &str)> {
        match (&self.fb_app_id, &self.fb_app_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("fb_app_id", &self.fb_app_id)
            .field("fb_app_secret", &self.fb_app_secret.as_ref().map(|_| "[redacted]"))
            .field("api_version", &self.api_version)
            .field("graph_base_url", &self.graph_base_url.as_str())
            .field("fetch_business_assets", &self.fetch_business_assets)
            .finish()
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.api_version, "v22.0");
        assert_eq!(config.graph_base_url.as_str(), "https://graph.facebook.com/");
        assert!(config.fetch_business_assets);
        assert!(config.app_credentials().is_none());
    }

    #[test]
    fn test_credentials_require_both_values() {
        let only_id = config_from(&[("FB_APP_ID", "123")]).unwrap();
        assert!(only_id.app_credentials().is_none());

        let blank_secret = config_from(&[("FB_APP_ID", "123"), ("FB_APP_SECRET", "  ")]).unwrap();
        assert!(blank_secret.app_credentials().is_none());

        let both = config_from(&[("FB_APP_ID", "123"), ("FB_APP_SECRET", "shh")]).unwrap();
        assert_eq!(both.app_credentials(), Some(("123", "shh")));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("FB_GRAPH_BASE_URL", "not a url")]).is_err());
        assert!(config_from(&[("FB_FETCH_BUSINESS_ASSETS", "maybe")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9100"),
            ("FB_API_VERSION", "v21.0"),
            ("FB_FETCH_BUSINESS_ASSETS", "off"),
        ])
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.api_version, "v21.0");
        assert!(!config.fetch_business_assets);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config_from(&[("FB_APP_ID", "123"), ("FB_APP_SECRET", "hunter2")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[redacted]"));
    }
}
