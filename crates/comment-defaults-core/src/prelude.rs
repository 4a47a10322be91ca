pub use comment_defaults_types::prelude::*;

pub use crate::app::App;

// vim: ts=4
