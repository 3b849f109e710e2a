//! Redis-backed epoch store.
//!
//! Each state vector is stored as JSON under `<prefix><epoch>`; a Redis set
//! under the index key holds the stored epochs. Bulk writes go through one
//! MULTI/EXEC transaction so readers never see a half-replaced store.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, error, info, instrument, warn};

use iss_core::error::{IssError, Result};
use iss_core::traits::EpochStore;
use iss_core::types::StateVector;

/// Redis connection settings.
#[derive(Clone, Debug)]
pub struct RedisConfig {
    /// Connection URL, e.g. `redis://redis-db:6379/0`
    pub url: String,
    /// Key prefix for state vectors
    pub key_prefix: String,
    /// Set of stored epochs
    pub index_key: String,
    /// Connection attempts before giving up
    pub max_attempts: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl RedisConfig {
    /// Creates a config for `url` with default prefix and retry policy.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key_prefix: "iss:epoch:".into(),
            index_key: "iss:epochs".into(),
            max_attempts: 5,
            retry_delay: Duration::from_secs(2),
        }
    }
}

/// State vector store kept in Redis.
pub struct RedisStore {
    conn: MultiplexedConnection,
    key_prefix: String,
    index_key: String,
}

impl RedisStore {
    /// Connects, retrying per `config` while the server is not up yet.
    #[instrument(skip(config), fields(url = %config.url))]
    pub async fn connect_with_retry(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| IssError::ConfigError(format!("Invalid Redis URL: {}", e)))?;

        let mut last_error = String::new();
        for attempt in 1..=config.max_attempts {
            match client.get_multiplexed_tokio_connection().await {
                Ok(mut conn) => {
                    let pong: redis::RedisResult<String> =
                        redis::cmd("PING").query_async(&mut conn).await;
                    match pong {
                        Ok(_) => {
                            info!(attempt, "Connected to Redis");
                            return Ok(Self {
                                conn,
                                key_prefix: config.key_prefix,
                                index_key: config.index_key,
                            });
                        }
                        Err(e) => last_error = e.to_string(),
                    }
                }
                Err(e) => last_error = e.to_string(),
            }

            if attempt < config.max_attempts {
                warn!(
                    attempt,
                    retry_in_secs = config.retry_delay.as_secs(),
                    error = %last_error,
                    "Redis connection attempt failed, retrying"
                );
                tokio::time::sleep(config.retry_delay).await;
            }
        }

        error!(attempts = config.max_attempts, "Redis connection failed");
        Err(IssError::StoreUnavailable {
            attempts: config.max_attempts,
            reason: last_error,
        })
    }

    fn key(&self, epoch: &str) -> String {
        epoch_key(&self.key_prefix, epoch)
    }

    async fn members(&self) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        conn.smembers(&self.index_key).await.map_err(store_error)
    }

    async fn exec(&self, pipe: &redis::Pipeline) -> Result<()> {
        let mut conn = self.conn.clone();
        pipe.query_async::<_, ()>(&mut conn)
            .await
            .map_err(store_error)
    }
}

fn store_error(err: redis::RedisError) -> IssError {
    IssError::StoreError(err.to_string())
}

fn epoch_key(prefix: &str, epoch: &str) -> String {
    format!("{}{}", prefix, epoch)
}

/// Builds one MULTI/EXEC transaction that drops `old` epochs and the index,
/// then writes `fresh` and rebuilds the index from it.
fn replace_pipeline(
    key_prefix: &str,
    index_key: &str,
    old: &[String],
    fresh: &BTreeMap<String, String>,
) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic();

    let stale: Vec<String> = old
        .iter()
        .filter(|epoch| !fresh.contains_key(*epoch))
        .map(|epoch| epoch_key(key_prefix, epoch))
        .collect();
    if !stale.is_empty() {
        pipe.del(stale).ignore();
    }
    pipe.del(index_key).ignore();

    for (epoch, payload) in fresh {
        pipe.set(epoch_key(key_prefix, epoch), payload).ignore();
    }
    if !fresh.is_empty() {
        let epochs: Vec<&String> = fresh.keys().collect();
        pipe.sadd(index_key, epochs).ignore();
    }
    pipe
}

#[async_trait]
impl EpochStore for RedisStore {
    async fn put(&self, epoch: &str, vector: StateVector) -> Result<()> {
        let payload = serde_json::to_string(&vector)?;
        let mut pipe = redis::pipe();
        pipe.atomic()
            .set(self.key(epoch), payload)
            .ignore()
            .sadd(&self.index_key, epoch)
            .ignore();
        self.exec(&pipe).await
    }

    async fn get(&self, epoch: &str) -> Result<StateVector> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.get(self.key(epoch)).await.map_err(store_error)?;
        match payload {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(IssError::EpochNotFound(epoch.to_string())),
        }
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut epochs = self.members().await?;
        epochs.sort();
        Ok(epochs)
    }

    async fn clear(&self) -> Result<()> {
        let old = self.members().await?;
        let pipe = replace_pipeline(&self.key_prefix, &self.index_key, &old, &BTreeMap::new());
        self.exec(&pipe).await?;
        debug!(removed = old.len(), "Cleared Redis epochs");
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let mut conn = self.conn.clone();
        conn.scard(&self.index_key).await.map_err(store_error)
    }

    async fn replace_all(&self, vectors: Vec<StateVector>) -> Result<usize> {
        let mut fresh = BTreeMap::new();
        for vector in vectors {
            let payload = serde_json::to_string(&vector)?;
            fresh.insert(vector.epoch, payload);
        }

        let old = self.members().await?;
        let pipe = replace_pipeline(&self.key_prefix, &self.index_key, &old, &fresh);
        self.exec(&pipe).await?;

        debug!(count = fresh.len(), dropped = old.len(), "Replaced Redis epochs");
        Ok(fresh.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RedisConfig::new("redis://localhost:6379/0");
        assert_eq!(config.key_prefix, "iss:epoch:");
        assert_eq!(config.index_key, "iss:epochs");
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_url() {
        let result = RedisStore::connect_with_retry(RedisConfig::new("not a url")).await;
        assert!(matches!(result, Err(IssError::ConfigError(_))));
    }

    fn packed(pipe: &redis::Pipeline) -> String {
        String::from_utf8_lossy(&pipe.get_packed_pipeline()).into_owned()
    }

    fn payloads(epochs: &[&str]) -> BTreeMap<String, String> {
        epochs
            .iter()
            .map(|e| (e.to_string(), format!("{{\"epoch\":\"{}\"}}", e)))
            .collect()
    }

    #[test]
    fn test_replace_is_one_transaction() {
        let old = vec!["2024-046T00:00:00.000Z".to_string()];
        let fresh = payloads(&["2024-047T12:00:00.000Z", "2024-047T12:04:00.000Z"]);
        let wire = packed(&replace_pipeline("iss:epoch:", "iss:epochs", &old, &fresh));

        assert!(wire.starts_with("*1\r\n$5\r\nMULTI\r\n"));
        assert!(wire.ends_with("*1\r\n$4\r\nEXEC\r\n"));
        assert!(wire.contains("iss:epoch:2024-046T00:00:00.000Z"));
        assert_eq!(wire.matches("\r\nSET\r\n").count(), 2);
        assert_eq!(wire.matches("\r\nSADD\r\n").count(), 1);
    }

    #[test]
    fn test_replace_keeps_overlapping_keys() {
        // Epochs present in both old and new are overwritten, not deleted.
        let old = vec!["2024-047T12:00:00.000Z".to_string()];
        let fresh = payloads(&["2024-047T12:00:00.000Z"]);
        let wire = packed(&replace_pipeline("iss:epoch:", "iss:epochs", &old, &fresh));

        // Only the index is deleted.
        assert_eq!(wire.matches("\r\nDEL\r\n").count(), 1);
        assert!(wire.contains("iss:epochs"));
    }

    #[test]
    fn test_clear_pipeline_empties_index() {
        let old = vec!["a".to_string(), "b".to_string()];
        let wire = packed(&replace_pipeline("iss:epoch:", "iss:epochs", &old, &BTreeMap::new()));

        assert_eq!(wire.matches("\r\nDEL\r\n").count(), 2);
        assert!(wire.contains("iss:epoch:a") && wire.contains("iss:epoch:b"));
        assert!(!wire.contains("SET") && !wire.contains("SADD"));
    }
}
