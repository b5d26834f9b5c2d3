//! Credentials and endpoints, read once from the environment.

use thiserror::Error;

use sleep_ingest::DEFAULT_API_URL;

pub const API_TOKEN_VAR: &str = "CONSENSUS_API_TOKEN";
pub const API_URL_VAR: &str = "CONSENSUS_API_URL";
pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const STORE_KEY_VAR: &str = "SUPABASE_SERVICE_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variables: {}", .vars.join(", "))]
    Missing { vars: Vec<&'static str> },
}

/// Credentials for the sleep diary API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub url: String,
    pub token: String,
}

/// Credentials for the hosted store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCredentials {
    pub url: String,
    pub service_key: String,
}

/// Process configuration.
///
/// Values are optional here; each command asks for the credentials it
/// needs, so a command that never touches the store runs without store
/// variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_token: Option<String>,
    pub api_url: Option<String>,
    pub store_url: Option<String>,
    pub store_key: Option<String>,
}

impl Config {
    /// Read the process environment, after loading `.env` if present.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            api_token: read(API_TOKEN_VAR),
            api_url: read(API_URL_VAR),
            store_url: read(STORE_URL_VAR),
            store_key: read(STORE_KEY_VAR),
        }
    }

    /// API endpoint and token; the endpoint defaults to the public one.
    pub fn api_credentials(&self) -> Result<ApiCredentials, ConfigError> {
        let token = self.api_token.clone().ok_or(ConfigError::Missing {
            vars: vec![API_TOKEN_VAR],
        })?;
        Ok(ApiCredentials {
            url: self
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token,
        })
    }

    /// Store URL and service key, reporting every missing variable.
    pub fn store_credentials(&self) -> Result<StoreCredentials, ConfigError> {
        match (&self.store_url, &self.store_key) {
            (Some(url), Some(key)) => Ok(StoreCredentials {
                url: url.clone(),
                service_key: key.clone(),
            }),
            (url, key) => {
                let mut vars = Vec::new();
                if url.is_none() {
                    vars.push(STORE_URL_VAR);
                }
                if key.is_none() {
                    vars.push(STORE_KEY_VAR);
                }
                Err(ConfigError::Missing { vars })
            }
        }
    }
}
