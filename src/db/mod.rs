pub mod memory;
pub mod redis;
pub mod store;

pub use self::memory::MemoryStore;
pub use self::redis::{create_redis_client, RedisStore};
pub use self::store::{load_json, save_json, KeyValueStore, StorageKey};

#[cfg(test)]
pub use self::store::MockKeyValueStore;
