//! Customer Registry Core - Shared domain types.
//!
//! This crate provides the types used across all customer registry components:
//! - `server` - Record store, service façade, HTTP and RPC front ends
//! - `cli` - Console demo
//! - `integration-tests` - End-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no locking, no HTTP. This keeps
//! it lightweight and lets every front end share one wire representation.
//!
//! # Modules
//!
//! - [`types`] - Customer records, identifiers, and email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
