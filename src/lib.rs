// Library exports for the API binary, the seed tool and tests
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::Config;
use db::{announcements::AnnouncementStore, memory::MemoryStore, teachers::TeacherDirectory};
use services::{announcements::AnnouncementService, auth::AuthService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub announcements: AnnouncementService,
    pub auth: AuthService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AnnouncementStore>,
        directory: Arc<dyn TeacherDirectory>,
        config: Config,
    ) -> Self {
        Self {
            announcements: AnnouncementService::new(store),
            auth: AuthService::new(directory),
            config: Arc::new(config),
        }
    }

    /// State backed by one `MemoryStore` serving both collections.
    pub fn in_memory(store: Arc<MemoryStore>, config: Config) -> Self {
        Self::new(store.clone(), store, config)
    }
}
