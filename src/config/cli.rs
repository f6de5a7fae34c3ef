use crate::config::{SourceKind, SourceSettings, TomlConfig};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "cadastre-lookup")]
#[command(about = "Look up a cadastral plot and estimate boundary staking cost")]
pub struct CliConfig {
    /// Cadastral number, e.g. 77:09:0005004:1234
    pub cadastral_number: String,

    /// Upstream to query (overrides the config file)
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the full gateway envelope instead of just the body
    #[arg(long)]
    pub envelope: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn source_settings(&self) -> Result<SourceSettings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => SourceSettings::default(),
        };

        if let Some(source) = self.source {
            settings.source = source;
        }

        Ok(settings)
    }
}
