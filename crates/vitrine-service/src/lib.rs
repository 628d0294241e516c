//! # Vitrine Service
//!
//! Business logic service layer for the vitrine product catalog.
//! Contains the cache-fronted listing and the write operations that
//! invalidate it.

pub mod cache;
pub mod dto;
pub mod product_service;

#[path = "impl/mod.rs"]
mod service_impl;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use service_impl::ProductServiceImpl;
