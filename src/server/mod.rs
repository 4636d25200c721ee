pub mod config;
mod content_routes;
mod http_layers;
mod response;
pub mod server;
pub mod state;
pub mod uploads;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use state::GuardedEntityStore;
