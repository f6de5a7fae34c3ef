use crate::config::{SourceKind, SourceSettings};
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::Validate;
use std::env;

/// Function configuration, read from the environment the hosting platform provides.
#[derive(Debug, Clone, Default)]
pub struct LambdaConfig {
    pub settings: SourceSettings,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = SourceSettings::default();

        if let Some(source) = lookup("PLOT_SOURCE") {
            settings.source = source.parse::<SourceKind>()?;
        }
        if let Some(user_agent) = lookup("UPSTREAM_USER_AGENT") {
            settings.nspd.user_agent = user_agent.clone();
            settings.pkk.user_agent = user_agent;
        }
        if let Some(url) = lookup("NSPD_SEARCH_URL") {
            settings.nspd.search_url = url;
        }
        if let Some(timeout) = lookup("NSPD_TIMEOUT_SECS") {
            settings.nspd.timeout_secs = parse_secs("NSPD_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(url) = lookup("PKK_FEATURE_URL") {
            settings.pkk.feature_url = url;
        }
        if let Some(referer) = lookup("PKK_REFERER") {
            settings.pkk.referer = referer;
        }
        if let Some(timeout) = lookup("PKK_TIMEOUT_SECS") {
            settings.pkk.timeout_secs = parse_secs("PKK_TIMEOUT_SECS", &timeout)?;
        }

        Ok(Self { settings })
    }
}

fn parse_secs(field: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| LookupError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Expected a whole number of seconds".to_string(),
        })
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        tracing::info!(
            "✅ Lambda configuration validation passed (source: {})",
            self.settings.source
        );
        Ok(())
    }
}
