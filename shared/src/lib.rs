pub mod config;
pub mod dynamo;
pub mod error;
pub mod handlers;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod records;
pub mod responses;
pub mod store;
pub mod types;
pub mod users;
pub mod validators;

use aws_sdk_dynamodb::Client as DynamoClient;
use config::Config;
use dynamo::DynamoUserStore;
use std::sync::Arc;
use store::UserStore;

/// Shared application state, built once per cold start
pub struct AppState {
    pub config: Config,
    pub store: Box<dyn UserStore>,
}

impl AppState {
    pub fn new(config: Config, store: Box<dyn UserStore>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }

    /// State backed by the DynamoDB table named in `config`.
    pub fn with_dynamo(config: Config, dynamo_client: DynamoClient) -> Arc<Self> {
        let store = DynamoUserStore::new(dynamo_client, config.table_name.clone());
        Self::new(config, Box::new(store))
    }
}
