use cadastre_lookup::utils::{logger, validation::Validate};
use cadastre_lookup::{CliConfig, GatewayRequest, PlotLookupHandler, ReqwestUpstreamClient};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cadastre-lookup CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = config.source_settings()?;
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let handler = PlotLookupHandler::new(settings.build_source(), ReqwestUpstreamClient::new());
    tracing::info!("Looking up {} via {}", config.cadastral_number, handler.source_tag());

    let response = handler
        .handle(&GatewayRequest::get(&config.cadastral_number))
        .await;

    if config.envelope {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        // body is compact JSON from the handler; re-indent for the terminal
        let body: serde_json::Value = serde_json::from_str(&response.body)?;
        println!("{}", serde_json::to_string_pretty(&body)?);
    }

    if response.status_code != 200 {
        std::process::exit(2);
    }

    Ok(())
}
