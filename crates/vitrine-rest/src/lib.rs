//! # Vitrine REST
//!
//! REST API layer for the vitrine product catalog.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
