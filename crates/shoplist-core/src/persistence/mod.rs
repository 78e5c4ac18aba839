//! Persistence layer for shoplist items
//!
//! Provides SQLite-backed storage for the items table.

mod repository;
mod schema;

pub use repository::Repository;
pub use schema::Schema;
