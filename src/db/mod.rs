//! Database module: models, schema and storage for persistent accounts.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the storage handle used by the registration service
//! - `connect.rs`: startup connection bootstrap with bounded retry

pub mod connect;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::Account;
pub use schema::SQLITE_INIT;
pub use sqlite::{AccountStorage, SqlitePool};
