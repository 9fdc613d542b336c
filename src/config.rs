//! Configuration for the model provider

use serde::{Deserialize, Serialize};
use log::{debug, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_BASE: &str
  = "https://generativelanguage.googleapis.com/v1beta";

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";
pub const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig
{   /// Model name
    pub model: String
  , /// API base URL (if custom)
    pub api_base: Option<String>
  , /// Request timeout in seconds
    pub timeout_secs: Option<u64>
}

impl ProviderConfig
{   /// Base URL with any trailing slash removed
    pub fn api_base(&self) -> &str
    {   self.api_base.as_deref()
          .unwrap_or(DEFAULT_API_BASE)
          .trim_end_matches('/')
    }
}

impl Default for ProviderConfig
{   fn default() -> Self
    {   ProviderConfig
        {   model: DEFAULT_MODEL.to_string()
          , api_base: None
          , timeout_secs: None
        }
    }
}

/// studynotes configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig
{   /// Model provider API key, never written out
    #[serde(skip_serializing)]
    pub api_key: Option<String>
  , /// Provider configuration
    #[serde(default)]
    pub provider: ProviderConfig
}

impl AgentConfig
{   /// Load from the process environment, reading `.env` first
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   match dotenvy::dotenv()
        {   Ok(path) => debug!("Loaded {}", path.display())
          , Err(e) if e.not_found() => debug!("No .env file found")
          , Err(e) => warn!("Ignoring unreadable .env file: {}", e)
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key -> value source
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where F: Fn(&str) -> Option<String>
    {   let non_blank = |key: &str| {
          lookup(key).filter(|v| !v.trim().is_empty())
        };

        let timeout_secs = match non_blank(TIMEOUT_VAR)
        {   Some(raw) => Some(
              raw.trim().parse::<u64>().map_err(|e| {
                crate::error::Error::InvalidConfiguration(
                  format!("{}={:?}: {}", TIMEOUT_VAR, raw, e)
                )
              })?
            )
          , None => None
        };

        let config = AgentConfig
        {   api_key: non_blank(API_KEY_VAR)
          , provider: ProviderConfig
            {   model: non_blank(MODEL_VAR)
                  .unwrap_or_else(|| DEFAULT_MODEL.to_string())
              , api_base: non_blank(API_BASE_VAR)
              , timeout_secs
            }
        };
        debug!(
          "Config: model={}, api key present={}",
          config.provider.model,
          config.api_key.is_some()
        );
        Ok(config)
    }

    /// The API key, or `MissingApiKey` when absent or blank
    pub fn require_api_key(&self)
      -> Result<&str, crate::error::Error>
    {   self.api_key.as_deref()
          .map(str::trim)
          .filter(|k| !k.is_empty())
          .ok_or_else(|| {
            crate::error::Error::MissingApiKey(
              API_KEY_VAR.to_string()
            )
          })
    }
}
