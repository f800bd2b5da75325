//! Customer Registry server library.
//!
//! The record store, service façade, and both front ends (HTTP and RPC) live
//! here as a library so the console demo and the integration tests can reuse
//! them.
//!
//! ```text
//! routes (HTTP) ─┐
//! rpc ───────────┼─> service::CustomerService ─> store::CustomerStore
//! cli demo ──────┘
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod rpc;
pub mod service;
pub mod state;
pub mod store;

pub use service::{CustomerService, ServiceError, ValidationError};
pub use store::CustomerStore;
