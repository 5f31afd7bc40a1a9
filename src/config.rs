use std::{collections::HashMap, time::Duration};

use config::{Config as ConfigLib, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

/// Placeholder substituted with the cluster id in the endpoint template.
pub const CLUSTER_ID_PLACEHOLDER: &str = "{cluster_id}";

pub const DEFAULT_ENDPOINT_TEMPLATE: &str =
    "https://api.digitalocean.com/v2/kubernetes/clusters/{cluster_id}/credentials";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub authority: AuthorityConfig,
    #[serde(default)]
    pub cluster: Option<ClusterConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorityConfig {
    pub endpoint_template: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub require_certificate: bool,
}

impl AuthorityConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    pub id: String,
    pub access_token: SecretString,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources(None)
    }

    pub fn load_with_sources(
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigLib::builder()
            .set_default("authority.endpoint_template", DEFAULT_ENDPOINT_TEMPLATE)?
            .set_default("authority.require_certificate", false)?
            .add_source(File::with_name("config/settings").required(false));

        // Explicit overrides replace the process environment so tests stay
        // independent of each other.
        if let Some(vars) = env_vars {
            for (key, value) in vars {
                builder = builder.set_override(&key, value)?;
            }
        } else {
            // e.g. CA_REFRESH_AUTHORITY__ENDPOINT_TEMPLATE or CA_REFRESH_CLUSTER__ACCESS_TOKEN
            builder = builder.add_source(
                Environment::with_prefix("CA_REFRESH")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        let config: Self = builder.build()?.try_deserialize()?;
        if !config
            .authority
            .endpoint_template
            .contains(CLUSTER_ID_PLACEHOLDER)
        {
            return Err(ConfigError::Message(format!(
                "authority.endpoint_template must contain {CLUSTER_ID_PLACEHOLDER}"
            )));
        }
        Ok(config)
    }
}
