use std::sync::Arc;
use nh_core::{Error, Result, SummaryCache};

pub mod backends;

pub use backends::*;

/// Build a cache backend by name. Only `memory` exists today.
pub fn create_cache(backend: &str, capacity: Option<usize>) -> Result<Arc<dyn SummaryCache>> {
    match backend {
        "memory" => {
            let config = MemoryConfig { capacity };
            Ok(Arc::new(InMemoryCache::new(config)))
        }
        other => Err(Error::Config(format!("Unknown cache backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_cache;
}
