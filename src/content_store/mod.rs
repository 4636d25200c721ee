mod entities;
mod models;
mod object_id;
mod sanitize;
mod schema;
mod store;
mod trait_def;
pub mod validation;

pub use models::*;
pub use object_id::generate_object_id;
pub use sanitize::{retain_meaningful, SubRecord};
pub use schema::CONTENT_VERSIONED_SCHEMAS;
pub use store::SqliteEntityStore;
pub use trait_def::{EntityStore, StoreError, StoreResult};
