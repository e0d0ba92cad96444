use std::sync::Arc;
use nh_sources::NewsManager;

pub struct AppState {
    pub manager: Arc<NewsManager>,
}

impl AppState {
    pub fn new(manager: Arc<NewsManager>) -> Self {
        Self { manager }
    }
}
