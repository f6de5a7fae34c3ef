#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::app::sources::{NspdSource, PkkSource};
use crate::core::PlotSource;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use lambda::LambdaConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_NSPD_SEARCH_URL: &str = "https://nspd.gov.ru/api/geoportal/v2/search/geoportal";
pub const DEFAULT_PKK_FEATURE_URL: &str = "https://pkk.rosreestr.ru/api/features/1";
pub const DEFAULT_PKK_REFERER: &str = "https://pkk.rosreestr.ru/";
pub const DEFAULT_NSPD_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PKK_TIMEOUT_SECS: u64 = 15;

const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SourceKind {
    /// NSPD geoportal search
    #[default]
    Nspd,
    /// Rosreestr public cadastral map
    Pkk,
}

impl FromStr for SourceKind {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nspd" => Ok(SourceKind::Nspd),
            "pkk" | "rosreestr" => Ok(SourceKind::Pkk),
            other => Err(LookupError::InvalidConfigValueError {
                field: "source".to_string(),
                value: other.to_string(),
                reason: "Expected one of: nspd, pkk".to_string(),
            }),
        }
    }
}

impl TryFrom<String> for SourceKind {
    type Error = LookupError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Nspd => write!(f, "nspd"),
            SourceKind::Pkk => write!(f, "pkk"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NspdSettings {
    pub search_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NspdSettings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_NSPD_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_NSPD_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PkkSettings {
    pub feature_url: String,
    pub user_agent: String,
    pub referer: String,
    pub timeout_secs: u64,
}

impl Default for PkkSettings {
    fn default() -> Self {
        Self {
            feature_url: DEFAULT_PKK_FEATURE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_PKK_REFERER.to_string(),
            timeout_secs: DEFAULT_PKK_TIMEOUT_SECS,
        }
    }
}

/// Which upstream to query and how to reach each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub source: SourceKind,
    pub nspd: NspdSettings,
    pub pkk: PkkSettings,
}

impl SourceSettings {
    pub fn build_source(&self) -> Box<dyn PlotSource> {
        match self.source {
            SourceKind::Nspd => Box::new(NspdSource::new(self.nspd.clone())),
            SourceKind::Pkk => Box::new(PkkSource::new(self.pkk.clone())),
        }
    }
}

impl Validate for SourceSettings {
    fn validate(&self) -> Result<()> {
        validate_url("nspd.search_url", &self.nspd.search_url)?;
        validate_non_empty_string("nspd.user_agent", &self.nspd.user_agent)?;
        validate_range("nspd.timeout_secs", self.nspd.timeout_secs, 1, MAX_TIMEOUT_SECS)?;

        validate_url("pkk.feature_url", &self.pkk.feature_url)?;
        validate_non_empty_string("pkk.user_agent", &self.pkk.user_agent)?;
        validate_url("pkk.referer", &self.pkk.referer)?;
        validate_range("pkk.timeout_secs", self.pkk.timeout_secs, 1, MAX_TIMEOUT_SECS)?;

        tracing::debug!("Source settings validated (active source: {})", self.source);
        Ok(())
    }
}
