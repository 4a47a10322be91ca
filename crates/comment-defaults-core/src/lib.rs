//! Per content type comment defaults.
//!
//! An administrator decides, per content type, whether new items start with
//! comments closed, and can apply an open or closed state to every published
//! item of a type at once. Storage is reached only through the `MetaAdapter`
//! trait from `comment-defaults-types`.

#![forbid(unsafe_code)]

pub mod app;
pub mod auth;
pub mod batch;
pub mod content;
pub mod defaults;
pub mod extract;
pub mod perm;
pub mod prelude;
pub mod routes;
pub mod settings;
pub mod signing;

pub use app::{App, AppBuilder, AppBuilderOpts, AppState};
pub use extract::Auth;

// vim: ts=4
