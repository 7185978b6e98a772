use std::env;

use crate::DeploymentError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    pub host: String,
    pub port: u16,
    /// `None` selects the database file in the asset directory.
    pub database_url: Option<String>,
    /// `None` generates a per-process secret.
    pub csrf_secret: Option<String>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            csrf_secret: None,
        }
    }
}

impl DeploymentConfig {
    /// Read `HOST`, `PORT`, `DATABASE_URL` and `CSRF_SECRET`.
    pub fn from_env() -> Result<Self, DeploymentError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DeploymentError> {
        let defaults = Self::default();
        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| DeploymentError::Config(format!("PORT={raw}: {e}")))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port,
            database_url: lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()),
            csrf_secret: lookup("CSRF_SECRET").filter(|s| !s.is_empty()),
        })
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url
            .as_deref()
            .is_some_and(|url| url.contains(":memory:"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<DeploymentConfig, DeploymentError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DeploymentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert!(config.csrf_secret.is_none());
    }

    #[test]
    fn test_values_are_read() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
        ])
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_bad_port_is_a_config_error() {
        assert!(matches!(
            config_from(&[("PORT", "http")]),
            Err(DeploymentError::Config(_))
        ));
    }
}
