use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use payment_gateway::adapters::rpc::dispatch;
use payment_gateway::domain::ports::ConfigProvider;
use payment_gateway::utils::logger;
use payment_gateway::{GatewayRequest, GatewayResponse, LambdaConfig, PaymentService, ValidationService};
use std::sync::Arc;

async fn function_handler(
    service: Arc<dyn PaymentService>,
    event: LambdaEvent<GatewayRequest>,
) -> Result<GatewayResponse, Error> {
    let operation = event.payload.operation();
    tracing::info!(
        request_id = %event.context.request_id,
        operation = operation.name(),
        "Handling gateway request"
    );

    let response = dispatch(service.as_ref(), event.payload).map_err(|e| {
        tracing::error!("❌ {} failed: {}", operation.name(), e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    tracing::info!("Lambda policy: {:?}", config.policy());

    let service: Arc<dyn PaymentService> = Arc::new(ValidationService::new(config.policy()));

    run(service_fn(move |event: LambdaEvent<GatewayRequest>| {
        let service = service.clone();
        async move { function_handler(service, event).await }
    }))
    .await
}
