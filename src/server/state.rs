use axum::extract::FromRef;

use crate::content_store::EntityStore;
use std::sync::Arc;
use std::time::Instant;

use super::uploads::UploadStore;
use super::ServerConfig;

pub type GuardedEntityStore = Arc<dyn EntityStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub entity_store: GuardedEntityStore,
    pub uploads: UploadStore,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedEntityStore {
    fn from_ref(input: &ServerState) -> Self {
        input.entity_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for UploadStore {
    fn from_ref(input: &ServerState) -> Self {
        input.uploads.clone()
    }
}
