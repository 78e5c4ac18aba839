//! Shoplist Core - shopping-list items and their storage
//!
//! This crate provides the non-HTTP half of the shoplist API:
//!
//! - **Item**: the shopping-list entry, owned by exactly one user and
//!   partitioned by a purchased/unpurchased flag
//! - **Persistence**: SQLite-backed repository for item CRUD and the
//!   count-by-category aggregate
//! - **Config**: server configuration loaded from the environment

pub mod config;
pub mod error;
pub mod item;
pub mod persistence;

pub use config::ServerConfig;
pub use error::{Result, StoreError};
pub use item::{CategoryCount, Item};
pub use persistence::{Repository, Schema};
