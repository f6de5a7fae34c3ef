pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::ReqwestUpstreamClient;
pub use app::sources::{NspdSource, PkkSource};
pub use config::{LambdaConfig, SourceKind, SourceSettings, TomlConfig};
pub use crate::core::handler::PlotLookupHandler;
pub use domain::model::{GatewayRequest, GatewayResponse, PlotResult};
pub use utils::error::{LookupError, Result};
