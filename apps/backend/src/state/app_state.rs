use std::sync::Arc;

use crate::config::server::ServerConfig;
use crate::services::game_flow::GameFlowService;
use crate::services::rooms::RoomHub;
use crate::store::{DocumentStore, MemoryStore};

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// Room actors; the coordinator is reachable through it.
    pub hub: Arc<RoomHub>,
    pub config: ServerConfig,
}

impl AppState {
    /// In-memory store, write policy from `config`.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), config)
    }

    pub fn with_store(store: Arc<dyn DocumentStore>, config: ServerConfig) -> Self {
        let flow = Arc::new(GameFlowService::new(store, config.write_policy));
        Self {
            hub: Arc::new(RoomHub::new(flow)),
            config,
        }
    }

    pub fn flow(&self) -> &Arc<GameFlowService> {
        self.hub.flow()
    }

    /// Default configuration with a short long-poll, for tests.
    pub fn for_tests() -> Self {
        Self::new(ServerConfig {
            long_poll: std::time::Duration::from_millis(200),
            ..ServerConfig::default()
        })
    }
}
