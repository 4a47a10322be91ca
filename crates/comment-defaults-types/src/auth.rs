//! Authenticated actor context and capability resolution
//!
//! Actors carry roles. Capabilities are derived from roles through a fixed
//! table, so privileged operations only ever ask `can(capability)`.

use serde::{Deserialize, Serialize};

/// Install-level administration. Required for the comment defaults settings
/// and for batch updates.
pub const CAP_INSTALL_PLUGINS: &str = "install_plugins";
/// Access to the discussion settings page
pub const CAP_MANAGE_OPTIONS: &str = "manage_options";
pub const CAP_EDIT_POSTS: &str = "edit_posts";
pub const CAP_UPLOAD_FILES: &str = "upload_files";

/// Site administrator role
pub const ROLE_ADMIN: &str = "SADM";
pub const ROLE_EDITOR: &str = "editor";

const ROLE_CAPABILITIES: &[(&str, &[&str])] = &[
	(ROLE_ADMIN, &[CAP_INSTALL_PLUGINS, CAP_MANAGE_OPTIONS, CAP_EDIT_POSTS, CAP_UPLOAD_FILES]),
	(ROLE_EDITOR, &[CAP_EDIT_POSTS, CAP_UPLOAD_FILES]),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCtx {
	pub id_tag: Box<str>,
	pub roles: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn new(id_tag: impl Into<Box<str>>, roles: &[&str]) -> Self {
		Self { id_tag: id_tag.into(), roles: roles.iter().map(|r| Box::from(*r)).collect() }
	}

	/// Check whether any of the actor's roles grants `capability`
	pub fn can(&self, capability: &str) -> bool {
		self.roles.iter().any(|role| {
			ROLE_CAPABILITIES
				.iter()
				.filter(|(name, _)| *name == role.as_ref())
				.any(|(_, caps)| caps.contains(&capability))
		})
	}
}


// vim: ts=4
