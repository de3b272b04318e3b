//! Cache module for Redis
//!
//! Provides the Redis client with retry logic and the Redis-backed
//! revocation ledger, whose entries expire through key TTLs.

pub mod redis_client;
pub mod revocation_store;


pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationRepository;

// Re-export commonly used types
pub use pa_shared::config::CacheConfig;
