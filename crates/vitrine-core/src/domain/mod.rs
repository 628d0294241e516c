//! Domain model for the product catalog.

pub mod entities;

pub use entities::*;
