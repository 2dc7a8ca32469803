use crate::error::ConfigError;

/// Settings resolved once at cold start and held for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `TABLE_NAME` (or the older `DB_NAME`) is required; `AWS_REGION` and
    /// `DYNAMODB_ENDPOINT` are optional. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let table_name = get("TABLE_NAME")
            .or_else(|| get("DB_NAME"))
            .ok_or(ConfigError::Missing("TABLE_NAME"))?;

        Ok(Self {
            table_name,
            region: get("AWS_REGION"),
            endpoint_url: get("DYNAMODB_ENDPOINT"),
        })
    }

    /// Shared AWS config with the region/endpoint overrides applied.
    pub async fn load_aws(&self) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        loader.load().await
    }
}
