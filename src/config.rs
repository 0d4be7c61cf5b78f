//! Environment-driven configuration for hosts embedding the registry.
//!
//! `NODE_REGISTRY_URL` names the base URL the registry is served from and
//! `NODE_REGISTRY_SOURCE` the node list to ingest at startup. Empty values
//! count as unset. Construction goes through a key lookup so tests can supply
//! values without touching the process environment.

use anyhow::{Context, Result, bail};
use std::env;
use tracing::info;
use url::Url;

pub const REGISTRY_URL_VAR: &str = "NODE_REGISTRY_URL";
pub const SOURCE_VAR: &str = "NODE_REGISTRY_SOURCE";

const DEFAULT_REGISTRY_URL: &str = "http://localhost:1336/";
const DEFAULT_SOURCE: &str = "nodes.csv";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    pub registry_url: Url,
    pub source: String,
}

impl RegistryConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// The registry URL must use an `http` or `https` scheme.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let registry_url = match non_empty(REGISTRY_URL_VAR) {
            Some(raw) => {
                let url = Url::parse(raw.trim())
                    .with_context(|| format!("{REGISTRY_URL_VAR} is not a valid URL: {raw}"))?;
                if !url.scheme().starts_with("http") {
                    bail!(
                        "Invalid scheme \"{}\" in node registry URL \"{url}\"",
                        url.scheme()
                    );
                }
                info!(%url, "using node registry");
                url
            }
            None => {
                info!(url = DEFAULT_REGISTRY_URL, "using default node registry");
                Url::parse(DEFAULT_REGISTRY_URL)?
            }
        };

        let source = non_empty(SOURCE_VAR).unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        Ok(Self {
            registry_url,
            source,
        })
    }
}
