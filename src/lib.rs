//! Sangeet content server library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod client;
pub mod config;
pub mod content_store;
pub mod form;
pub mod listing;
pub mod seed;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use content_store::{EntityStore, SqliteEntityStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
