use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};

pub const ENV_API_TOKEN: &str = "TAPIT_API_KEY";
pub const ENV_PROJECT_ID: &str = "PROJECT_ID";
pub const ENV_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
pub const ENV_API_BASE: &str = "TAPIT_API_BASE";
pub const ENV_LINK_PREFIX: &str = "LINK_NAME_PREFIX";
pub const ENV_LOOKBACK_DAYS: &str = "STATS_LOOKBACK_DAYS";
pub const ENV_PAGE_SIZE: &str = "LINKS_PAGE_SIZE";

// The provider's stats contract was never confirmed upstream, so the base
// URL stays overridable instead of hardcoded.
pub const DEFAULT_API_BASE: &str = "https://api.taap.it";
const DEFAULT_LINK_PREFIX: &str = "EMPIRE";
const DEFAULT_LOOKBACK_DAYS: u32 = 30;
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Process configuration, read from the environment once at startup and
/// handed to the pipeline through [`ConfigProvider`].
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub api_token: String,
    pub project_id: String,
    pub webhook_url: String,
    pub api_base: String,
    pub link_prefix: String,
    pub lookback_days: u32,
    pub page_size: u32,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any name -> value lookup. Keeps tests off
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset for both required and optional keys.
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &str| -> Result<String> {
            optional(name).ok_or_else(|| ReportError::MissingConfigError {
                field: name.to_string(),
            })
        };

        let config = Self {
            api_token: required(ENV_API_TOKEN)?,
            project_id: required(ENV_PROJECT_ID)?,
            webhook_url: required(ENV_WEBHOOK_URL)?,
            api_base: optional(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            link_prefix: optional(ENV_LINK_PREFIX)
                .unwrap_or_else(|| DEFAULT_LINK_PREFIX.to_string()),
            lookback_days: parse_number(
                ENV_LOOKBACK_DAYS,
                optional(ENV_LOOKBACK_DAYS),
                DEFAULT_LOOKBACK_DAYS,
            )?,
            page_size: parse_number(ENV_PAGE_SIZE, optional(ENV_PAGE_SIZE), DEFAULT_PAGE_SIZE)?,
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_number(field: &str, value: Option<String>, default: u32) -> Result<u32> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ReportError::InvalidConfigValueError {
                field: field.to_string(),
                value: raw,
                reason: "expected a positive integer".to_string(),
            }),
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string(ENV_API_TOKEN, &self.api_token)?;
        validate_non_empty_string(ENV_PROJECT_ID, &self.project_id)?;
        validate_url(ENV_WEBHOOK_URL, &self.webhook_url)?;
        validate_url(ENV_API_BASE, &self.api_base)?;
        validate_positive_number(ENV_LOOKBACK_DAYS, self.lookback_days, 1)?;
        validate_positive_number(ENV_PAGE_SIZE, self.page_size, 1)?;
        Ok(())
    }
}

impl ConfigProvider for EnvConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn api_token(&self) -> &str {
        &self.api_token
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    fn link_prefix(&self) -> &str {
        &self.link_prefix
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn lookback_days(&self) -> u32 {
        self.lookback_days
    }
}
