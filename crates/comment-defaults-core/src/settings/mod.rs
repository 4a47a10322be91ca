//! Settings subsystem for per content type comment defaults
//!
//! - **Policy** (`policy.rs`): the stored mapping and its boolean coercion
//! - **Types** (`types.rs`): setting registration and the frozen registry
//! - **Service** (`service.rs`): `SettingsStore`, load/save of the mapping
//! - **Render** / **Form**: the admin form fragment and its submission
//! - **Handler** (`handler.rs`): the discussion settings page

pub mod form;
pub mod handler;
pub mod policy;
pub mod render;
pub mod service;
pub mod types;

pub use policy::{PolicySettings, TypePolicy};
pub use service::SettingsStore;
pub use types::{
	FrozenSettingsRegistry, RenderContext, SettingDefinition, SettingDefinitionBuilder,
	SettingsRegistry,
};

use comment_defaults_types::auth::CAP_INSTALL_PLUGINS;

use crate::prelude::*;

/// Storage key of the policy mapping
pub const SETTINGS_KEY: &str = "comment_defaults_settings";

/// Admin page section the policy field is shown in
pub const SETTINGS_SECTION: &str = "discussion";

/// Action name the settings form is signed for
pub const SETTINGS_ACTION: &str = "discussion-options";

/// Register the comment defaults field on the discussion settings page
pub fn register_settings(registry: &mut SettingsRegistry) -> ClResult<()> {
	registry.register(
		SettingDefinition::builder(SETTINGS_KEY)
			.title("Comment Defaults")
			.section(SETTINGS_SECTION)
			.capability(CAP_INSTALL_PLUGINS)
			.renderer(|ctx| {
				let mut html = render::render_policy_field(ctx.templates, ctx.content_types, ctx.policy)?;
				html.push_str(&render::render_batch_links(
					ctx.templates,
					ctx.content_types,
					ctx.signer,
					&ctx.actor.id_tag,
					ctx.page_path,
				)?);
				Ok(html)
			})
			.build()?,
	)?;

	Ok(())
}

// vim: ts=4
