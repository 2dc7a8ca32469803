use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{run, service_fn, tracing, Error, Request};
use std::sync::Arc;
use user_api_shared::config::Config;
use user_api_shared::AppState;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // Resolve config and build the DynamoDB client once at startup
    let config = Config::from_env()?;
    let aws_config = config.load_aws().await;
    tracing::info!(
        "Starting user API - table: {} region: {:?}",
        config.table_name,
        aws_config.region()
    );

    let state = AppState::with_dynamo(config, DynamoClient::new(&aws_config));

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
