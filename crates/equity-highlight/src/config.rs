//! Environment-to-host resolution.
//!
//! The widget never decides which host an environment flag maps to; it is
//! handed a [`HostTable`] through [`WidgetOptions`](crate::WidgetOptions) and
//! looks the flag up. Unknown or missing flags fall back to the table's
//! default environment.
//!
//! ```rust
//! use equity_highlight::HostTable;
//!
//! let table = HostTable::from_json_str(
//!     r#"{
//!         "default_environment": "prod",
//!         "hosts": {
//!             "prod": { "url": "https://markets.example.com" },
//!             "test": { "url": "https://markets-test.example.com", "source_key": "demo" }
//!         }
//!     }"#,
//! )?;
//!
//! assert_eq!(table.resolve(Some("TEST")).source_key.as_deref(), Some("demo"));
//! assert_eq!(table.resolve(Some("staging")).url, "https://markets.example.com");
//! # Ok::<(), equity_highlight::ValidationError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Production host for the securities web services.
pub const PROD_HOST_URL: &str = "https://markets.ft.com";
/// Source key attached to requests issued from the dev environment.
pub const DEV_SOURCE_KEY: &str = "o-equity-highlight-app";

/// Base host and optional attribution key for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,
}

impl HostConfig {
    pub fn new(url: impl Into<String>, source_key: Option<String>) -> Self {
        Self {
            url: url.into(),
            source_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHostTable {
    default_environment: String,
    hosts: BTreeMap<String, HostConfig>,
}

/// Validated environment → host mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTable {
    default_environment: String,
    default_host: HostConfig,
    hosts: BTreeMap<String, HostConfig>,
}

impl HostTable {
    /// Builds a table; keys are matched case-insensitively.
    pub fn new(
        default_environment: impl AsRef<str>,
        hosts: impl IntoIterator<Item = (String, HostConfig)>,
    ) -> Result<Self, ValidationError> {
        let default_environment = normalize_environment(default_environment.as_ref());
        let mut table = BTreeMap::new();
        for (environment, mut host) in hosts {
            let environment = normalize_environment(&environment);
            let url = host.url.trim().trim_end_matches('/');
            if url.is_empty() {
                return Err(ValidationError::EmptyHostUrl { environment });
            }
            host.url = url.to_owned();
            host.source_key = host
                .source_key
                .map(|key| key.trim().to_owned())
                .filter(|key| !key.is_empty());
            table.insert(environment, host);
        }

        let Some(default_host) = table.get(&default_environment).cloned() else {
            return Err(ValidationError::MissingDefaultEnvironment {
                environment: default_environment,
            });
        };

        Ok(Self {
            default_environment,
            default_host,
            hosts: table,
        })
    }

    pub fn from_json_str(input: &str) -> Result<Self, ValidationError> {
        let raw: RawHostTable =
            serde_json::from_str(input).map_err(|e| ValidationError::MalformedHostTable {
                message: e.to_string(),
            })?;
        Self::new(raw.default_environment, raw.hosts)
    }

    pub fn default_environment(&self) -> &str {
        &self.default_environment
    }

    /// Resolves an environment flag to its host entry.
    pub fn resolve(&self, environment: Option<&str>) -> &HostConfig {
        environment
            .map(normalize_environment)
            .and_then(|environment| self.hosts.get(&environment))
            .unwrap_or(&self.default_host)
    }
}

impl Default for HostTable {
    fn default() -> Self {
        let prod = HostConfig::new(PROD_HOST_URL, None);
        Self {
            default_environment: String::from("prod"),
            default_host: prod.clone(),
            hosts: BTreeMap::from([
                (String::from("prod"), prod),
                (
                    String::from("dev"),
                    HostConfig::new(PROD_HOST_URL, Some(String::from(DEV_SOURCE_KEY))),
                ),
            ]),
        }
    }
}

fn normalize_environment(environment: &str) -> String {
    environment.trim().to_ascii_lowercase()
}
