pub mod file_store;
pub mod postgres;
pub mod profile_store;
pub mod redis;

pub use file_store::FileProfileStore;
pub use postgres::{create_pool, run_migrations, PgProfileStore};
pub use profile_store::{storage_key, ProfileStore};
pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
