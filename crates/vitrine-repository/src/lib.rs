//! Data access layer for the vitrine catalog service.
//!
//! Exposes the [`ProductRepository`] trait, its MySQL implementation, and
//! the shared [`DatabasePool`].

mod pool;
mod traits;

pub mod mysql;

pub use mysql::MySqlProductRepository;
pub use pool::{create_pool, DatabasePool};
pub use traits::{ProductChanges, ProductRepository};
