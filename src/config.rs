// ⚙️ Configuration - Built once at startup, passed down explicitly

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.company-information.service.gov.uk";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 50;

/// Signing secret used by the CLI, which never issues cookies
const DEV_SECRET_KEY: &str = "ch-viewer-development-secret";

#[derive(Debug, Clone)]
pub struct Config {
    /// Registry API key, sent as the Basic auth username
    pub api_key: String,

    /// Secret for signing flash cookies
    pub secret_key: String,

    pub api_base_url: String,

    /// Company shown on `/` when set
    pub default_company: Option<String>,

    pub bind_addr: String,

    pub items_per_page: u32,
}

impl Config {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], but a missing `SECRET_KEY` falls back to a fixed dev value
    pub fn from_env_allow_dev_secret() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) if key == "SECRET_KEY" => Some(DEV_SECRET_KEY.to_string()),
            Err(_) => None,
        })
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("COMPANIES_HOUSE_API_KEY").ok_or(ConfigError::Missing("COMPANIES_HOUSE_API_KEY"))?;
        let secret_key = get("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let items_per_page = match get("ITEMS_PER_PAGE") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "ITEMS_PER_PAGE",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_ITEMS_PER_PAGE,
        };

        Ok(Config {
            api_key,
            secret_key,
            api_base_url: get("COMPANIES_HOUSE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            default_company: get("COMPANY_ID"),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            items_per_page,
        })
    }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup(&[
            ("COMPANIES_HOUSE_API_KEY", "key"),
            ("SECRET_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.items_per_page, DEFAULT_ITEMS_PER_PAGE);
        assert!(config.default_company.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("COMPANIES_HOUSE_API_KEY", "key"),
            ("SECRET_KEY", "secret"),
            ("COMPANY_ID", "00000006"),
            ("ITEMS_PER_PAGE", "10"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ]))
        .unwrap();

        assert_eq!(config.default_company.as_deref(), Some("00000006"));
        assert_eq!(config.items_per_page, 10);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_lookup(lookup(&[("SECRET_KEY", "secret"), ("COMPANIES_HOUSE_API_KEY", " ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("COMPANIES_HOUSE_API_KEY")));
    }

    #[test]
    fn test_invalid_items_per_page() {
        let err = Config::from_lookup(lookup(&[
            ("COMPANIES_HOUSE_API_KEY", "key"),
            ("SECRET_KEY", "secret"),
            ("ITEMS_PER_PAGE", "0"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: "ITEMS_PER_PAGE", .. }));
    }
}
