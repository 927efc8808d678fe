//! Redis-backed product storage lookups.
//!
//! Product records are denormalized into a key-value mapping per locale:
//! `product_abstract:{locale}:sku:{sku}` and
//! `product_concrete:{locale}:sku:{sku}`, each key holding one JSON record.
//! A missing key is a miss; a key holding malformed JSON is a fault.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use core_config::{env_required, ConfigError, FromEnv};

use crate::clients::ProductStorageClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{AbstractProductRecord, ConcreteProductRecord};

/// Connection settings of the product storage.
#[derive(Clone, Debug)]
pub struct RedisStorageConfig {
    /// Redis connection URL (required)
    pub url: String,
}

impl FromEnv for RedisStorageConfig {
    /// Reads `STORAGE_REDIS_URL` (required), e.g. "redis://127.0.0.1:6379".
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("STORAGE_REDIS_URL")?,
        })
    }
}

/// Product storage client over a Redis key-value mapping.
pub struct RedisProductStorage {
    connection: ConnectionManager,
}

impl RedisProductStorage {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    /// Connect and verify the connection with a PING.
    pub async fn connect(config: &RedisStorageConfig) -> ClientResult<Self> {
        info!("Connecting to product storage at {}", config.url);

        let client = redis::Client::open(config.url.as_str())?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        info!("Product storage connected");
        Ok(Self::new(manager))
    }
}

#[async_trait]
impl ProductStorageClient for RedisProductStorage {
    async fn find_abstract_product_by_sku(
        &self,
        sku: &str,
        locale: &str,
    ) -> ClientResult<Option<AbstractProductRecord>> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(abstract_product_key(locale, sku)).await?;

        match raw {
            None => Ok(None),
            Some(json) => parse_record(&json).map(Some),
        }
    }

    async fn get_concrete_products_by_skus(
        &self,
        skus: &[String],
        locale: &str,
    ) -> ClientResult<Vec<ConcreteProductRecord>> {
        if skus.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = skus
            .iter()
            .map(|sku| concrete_product_key(locale, sku))
            .collect();

        let mut conn = self.connection.clone();
        let values: Vec<Option<String>> = conn.mget(&keys).await?;

        let mut records = Vec::new();
        for value in values.into_iter().flatten() {
            records.push(parse_record(&value)?);
        }
        debug!(
            "Resolved {} of {} concrete products from storage",
            records.len(),
            skus.len()
        );
        Ok(records)
    }
}

fn abstract_product_key(locale: &str, sku: &str) -> String {
    format!("product_abstract:{}:sku:{}", locale.to_lowercase(), sku)
}

fn concrete_product_key(locale: &str, sku: &str) -> String {
    format!("product_concrete:{}:sku:{}", locale.to_lowercase(), sku)
}

fn parse_record<T: DeserializeOwned>(raw: &str) -> ClientResult<T> {
    serde_json::from_str(raw).map_err(|e| ClientError::Malformed {
        origin: "storage",
        details: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats_lowercase_the_locale() {
        assert_eq!(
            abstract_product_key("de_DE", "001"),
            "product_abstract:de_de:sku:001"
        );
        assert_eq!(
            concrete_product_key("en_US", "001_25904006"),
            "product_concrete:en_us:sku:001_25904006"
        );
    }

    #[test]
    fn test_parse_record_reads_storage_documents() {
        let record: ConcreteProductRecord =
            parse_record(r#"{"id_product_abstract": 100, "sku": "001_25904006"}"#).unwrap();
        assert_eq!(record.id_product_abstract, 100);
        assert_eq!(record.sku, "001_25904006");
    }

    #[test]
    fn test_parse_record_tolerates_extra_fields() {
        let record: AbstractProductRecord = parse_record(
            r#"{"id_product_abstract": 100, "sku": "001", "name": "Canon IXUS 160"}"#,
        )
        .unwrap();
        assert_eq!(record.sku, "001");
    }

    #[test]
    fn test_parse_record_rejects_malformed_documents() {
        let result: ClientResult<AbstractProductRecord> = parse_record(r#"{"sku": "001"}"#);
        assert!(matches!(result, Err(ClientError::Malformed { .. })));
    }
}
