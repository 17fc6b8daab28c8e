// Configuration module: everything the run needs from the environment is
// read here, once, into a `Config` that is then passed by reference.

use std::path::PathBuf;
use std::time::Duration;

use crate::batch::{NameTemplate, BATCH_SIZE};
use crate::error::ConfigError;

pub const ENV_BASE_URL: &str = "TL_URL";
pub const ENV_ACCESS_KEY: &str = "PC_IDENTITY";
pub const ENV_ACCESS_SECRET: &str = "PC_SECRET";
pub const ENV_HOSTS_FILE: &str = "HOSTS_FILE";
pub const ENV_NAME_TEMPLATE: &str = "COLLECTION_NAME_TEMPLATE";
pub const ENV_SKIP_TLS_VERIFY: &str = "TL_SKIP_TLS_VERIFY";

pub const DEFAULT_HOSTS_FILE: &str = "hosts.txt";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Access key pair plus the console base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub access_secret: String,
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub credentials: Credentials,
    pub hosts_file: PathBuf,
    pub batch_size: usize,
    pub name_template: NameTemplate,
    pub request_timeout: Duration,
    pub accept_invalid_certs: bool,
}

impl Config {
    /// Build the configuration from the process environment. A `.env`
    /// file in the working directory is loaded first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// The base URL is checked before the credentials so a missing
    /// `TL_URL` is always the first thing reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let base_url = required(ENV_BASE_URL)?.trim().trim_end_matches('/').to_string();
        let access_key = required(ENV_ACCESS_KEY)?;
        let access_secret = required(ENV_ACCESS_SECRET)?;

        let hosts_file = lookup(ENV_HOSTS_FILE)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOSTS_FILE));

        let name_template = match lookup(ENV_NAME_TEMPLATE) {
            Some(t) if !t.trim().is_empty() => NameTemplate::new(t)?,
            _ => NameTemplate::default(),
        };

        let accept_invalid_certs = lookup(ENV_SKIP_TLS_VERIFY)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Config {
            credentials: Credentials {
                access_key,
                access_secret,
                base_url,
            },
            hosts_file,
            batch_size: BATCH_SIZE,
            name_template,
            request_timeout: REQUEST_TIMEOUT,
            accept_invalid_certs,
        })
    }

    /// Override the batch size. Zero is rejected.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        self.batch_size = batch_size;
        Ok(self)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_BASE_URL, "https://console.example.com/"),
            (ENV_ACCESS_KEY, "key-id"),
            (ENV_ACCESS_SECRET, "key-secret"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&full_env())).unwrap();
        assert_eq!(config.credentials.base_url, "https://console.example.com");
        assert_eq!(config.credentials.access_key, "key-id");
        assert_eq!(config.credentials.access_secret, "key-secret");
        assert_eq!(config.hosts_file, PathBuf::from("hosts.txt"));
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.name_template.render(3), "defender-update-collection-3");
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_missing_base_url_reported_first() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("TL_URL"));
        assert!(err.to_string().contains("TL_URL"));
    }

    #[test]
    fn test_missing_secret() {
        let env = [(ENV_BASE_URL, "https://c"), (ENV_ACCESS_KEY, "k")];
        let err = Config::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("PC_SECRET"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let env = [
            (ENV_BASE_URL, "https://c"),
            (ENV_ACCESS_KEY, "   "),
            (ENV_ACCESS_SECRET, "s"),
        ];
        let err = Config::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("PC_IDENTITY"));
    }

    #[test]
    fn test_optional_overrides() {
        let mut env = full_env();
        env.push((ENV_HOSTS_FILE, "/tmp/other.txt"));
        env.push((ENV_NAME_TEMPLATE, "batch_{index}"));
        env.push((ENV_SKIP_TLS_VERIFY, "TRUE"));
        let config = Config::from_lookup(lookup_from(&env)).unwrap();
        assert_eq!(config.hosts_file, PathBuf::from("/tmp/other.txt"));
        assert_eq!(config.name_template.render(7), "batch_7");
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut env = full_env();
        env.push((ENV_NAME_TEMPLATE, "static-name"));
        let err = Config::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, ConfigError::InvalidTemplate("static-name".into()));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = Config::from_lookup(lookup_from(&full_env())).unwrap();
        assert_eq!(config.clone().with_batch_size(0).unwrap_err(), ConfigError::ZeroBatchSize);
        assert_eq!(config.with_batch_size(2).unwrap().batch_size, 2);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
