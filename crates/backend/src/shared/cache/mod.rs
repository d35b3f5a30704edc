pub mod key;
pub mod middleware;
pub mod store;

pub use key::{build_cache_key, CacheUser};
pub use middleware::cache_layer;
pub use store::{CachedBody, ResponseCache};
