//! PostgreSQL persistence for the visitor record.
//!
//! Diesel row structs and table definitions stay private to this module;
//! only the port implementation, the pool and the migration runner are
//! exported.
//!
//! ```ignore
//! use eduverse_backend::outbound::persistence::{
//!     DbPool, DieselVisitorStore, PoolConfig, run_migrations,
//! };
//!
//! run_migrations(&database_url).await?;
//! let pool = DbPool::new(PoolConfig::new(database_url)).await?;
//! let store = DieselVisitorStore::new(pool);
//! ```

mod diesel_visitor_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_visitor_store::DieselVisitorStore;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
