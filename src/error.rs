// ⚠️ Errors - Config and registry failures

use thiserror::Error;

/// Startup configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Failures talking to the registry API
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("registry sent malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryError {
    /// True when the registry answered 404 for the requested resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::Upstream { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let missing = RegistryError::Upstream { status: 404, body: String::new() };
        let broken = RegistryError::Upstream { status: 500, body: "oops".to_string() };

        assert!(missing.is_not_found());
        assert!(!broken.is_not_found());
        assert_eq!(broken.to_string(), "registry returned 500: oops");
    }
}
