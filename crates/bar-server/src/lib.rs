//! Bar-server — library crate for the bar assistant memory layer.
//!
//! Re-exports all modules so the binary (`main.rs`) and embedders can build
//! the configured application (`AppState`, `build_router`, health attachment)
//! without starting a listener.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
