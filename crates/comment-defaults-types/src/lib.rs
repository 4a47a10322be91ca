//! Shared types, adapter traits, and core utilities for comment defaults.
//!
//! This crate contains the foundational types that are shared between the
//! core crate and the adapter implementations, so adapters do not have to
//! depend on the HTTP layer.

pub mod auth;
pub mod error;
pub mod meta_adapter;
pub mod prelude;
pub mod types;

// vim: ts=4
