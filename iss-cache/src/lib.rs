//! State vector stores for the ISS tracker.
//!
//! [`MemoryStore`] keeps everything in-process. With the `redis` feature,
//! [`RedisStore`] keeps vectors in a shared Redis instance so a restarted
//! server can answer before its first refresh.

mod memory;
#[cfg(feature = "redis")]
mod redis_store;

pub use memory::{MemoryStore, StoreStats};
#[cfg(feature = "redis")]
pub use redis_store::{RedisConfig, RedisStore};
