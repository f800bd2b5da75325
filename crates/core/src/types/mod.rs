//! Core types for the customer registry.
//!
//! This module provides the customer record and type-safe wrappers for the
//! values it carries.

pub mod customer;
pub mod email;
pub mod id;

pub use customer::{Address, Customer};
pub use email::{Email, EmailError};
pub use id::*;
