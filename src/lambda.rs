#[cfg(feature = "lambda")]
use cadastre_lookup::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use cadastre_lookup::{
    GatewayRequest, GatewayResponse, LambdaConfig, PlotLookupHandler, ReqwestUpstreamClient,
};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: &PlotLookupHandler<ReqwestUpstreamClient>,
    event: LambdaEvent<GatewayRequest>,
) -> Result<GatewayResponse, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Handling plot lookup");
    Ok(handler.handle(&event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let handler = PlotLookupHandler::new(
        config.settings.build_source(),
        ReqwestUpstreamClient::new(),
    );
    tracing::info!("Plot lookup function ready (source: {})", handler.source_tag());

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<GatewayRequest>| async move {
        function_handler(handler, event).await
    }))
    .await
}
