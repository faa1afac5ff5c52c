use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_TABLE: &str = "contact_messages";

pub const URL_VAR: &str = "PORTFOLIO_BACKEND_URL";
pub const KEY_VAR: &str = "PORTFOLIO_BACKEND_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} was not set at build time")]
    Missing(&'static str),

    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Where contact messages get written to.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BackendConfig {
    pub url: Url,
    pub anon_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_owned()
}

impl BackendConfig {
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let config = BackendConfig {
            url: Url::parse(url)?,
            anon_key: anon_key.into(),
            table: default_table(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads the endpoint and key baked in when the crate was compiled.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        let url = option_env!("PORTFOLIO_BACKEND_URL").ok_or(ConfigError::Missing(URL_VAR))?;
        let key = option_env!("PORTFOLIO_BACKEND_KEY").ok_or(ConfigError::Missing(KEY_VAR))?;
        Self::new(url, key)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BackendConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("backend url must be http(s)"));
        }
        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::Invalid("backend key is empty"));
        }
        if self.table.is_empty() {
            return Err(ConfigError::Invalid("table name is empty"));
        }
        Ok(())
    }
}
