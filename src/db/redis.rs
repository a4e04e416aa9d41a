use redis::{Client, Commands};

use super::KeyValueStore;
use crate::error::AppResult;

/// Creates a Redis client for persisted widget state
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed storage
///
/// Entries are written without expiry; the catalog snapshot stays cached
/// until something outside the widget deletes the key.
#[derive(Clone)]
pub struct RedisStore {
    redis_client: Client,
}

impl RedisStore {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }
}

impl KeyValueStore for RedisStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.redis_client.get_connection()?;
        let value: Option<String> = conn.get(key)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.redis_client.get_connection()?;
        let _: () = conn.set(key, value)?;
        Ok(())
    }
}

// Requires a running Redis; point REDIS_URL at it to run these.
