//! Flat string-keyed JSON store. No business logic lives here.

pub mod memory;
pub mod postgres;

pub use memory::MemoryKvStore;
pub use postgres::PostgresKvStore;

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Storage primitive the review store is built on.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>>;

    async fn set(&self, key: &str, value: JsonValue) -> Result<()>;

    /// Removes `key`. Absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// All entries whose key starts with `prefix`, ordered by key.
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, JsonValue)>>;

    /// Writes `value` only if `key` is absent. Returns whether the write happened.
    ///
    /// The default is a plain check-then-set and is NOT atomic: two concurrent callers can both
    /// observe the key as absent and both write. Backends with a conditional put override this.
    async fn set_if_absent(&self, key: &str, value: JsonValue) -> Result<bool> {
        if self.get(key).await?.is_some() {
            return Ok(false);
        }
        self.set(key, value).await?;
        Ok(true)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

impl dyn KvStore {
    /// Reads and decodes `key`. A present but undecodable value is an error.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }

    pub async fn set_as<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.set(key, serde_json::to_value(value)?).await
    }
}
