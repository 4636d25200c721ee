use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use axum::{
    extract::{DefaultBodyLimit, State},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::{info, warn};

#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::content_routes::{make_entity_routes, make_migration_routes};
use super::uploads::{UploadStore, MEDIA_URL_PREFIX};
use super::{log_requests, state::*, ServerConfig};
use crate::content_store::{BlogPost, EntityKind, MusicClass, Qawwal, Singer};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    /// Entity counts keyed by collection name.
    pub entities: BTreeMap<&'static str, usize>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let mut entities = BTreeMap::new();
    for kind in EntityKind::ALL {
        match state.entity_store.count(kind) {
            Ok(count) => {
                entities.insert(kind.collection(), count);
            }
            Err(err) => warn!("Failed to count {}: {}", kind, err),
        }
    }

    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        entities,
    })
}

impl ServerState {
    fn new(config: ServerConfig, entity_store: GuardedEntityStore) -> ServerState {
        let uploads = UploadStore::new(config.media_path.clone(), config.max_upload_bytes);
        ServerState {
            config,
            start_time: Instant::now(),
            entity_store,
            uploads,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

pub fn make_app(config: ServerConfig, entity_store: GuardedEntityStore) -> Result<Router> {
    std::fs::create_dir_all(&config.media_path).with_context(|| {
        format!(
            "Failed to create media directory {}",
            config.media_path.display()
        )
    })?;

    let state = ServerState::new(config.clone(), entity_store);

    let api_routes: Router = Router::new()
        .nest(
            &format!("/{}", EntityKind::Singer.collection()),
            make_entity_routes::<Singer>(state.clone()),
        )
        .nest(
            &format!("/{}", EntityKind::Qawwal.collection()),
            make_entity_routes::<Qawwal>(state.clone()),
        )
        .nest(
            &format!("/{}", EntityKind::Blog.collection()),
            make_entity_routes::<BlogPost>(state.clone()),
        )
        .nest(
            &format!("/{}", EntityKind::Class.collection()),
            make_migration_routes(state.clone())
                .merge(make_entity_routes::<MusicClass>(state.clone())),
        )
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    let home_router: Router = match &config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    #[allow(unused_mut)]
    let mut app: Router = home_router
        .nest("/api", api_routes)
        .nest_service(MEDIA_URL_PREFIX, ServeDir::new(&config.media_path));

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(config.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(config: ServerConfig, entity_store: GuardedEntityStore) -> Result<()> {
    let port = config.port;
    let app = make_app(config, entity_store)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Content server listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
