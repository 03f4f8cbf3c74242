//! Reel application library
//!
//! The movies module and the bootstrap that wires it into the HTTP server.

pub mod app;
pub mod modules;

pub use app::{build_registry, serve};
