//! Settings registration types
//!
//! A setting is declared once at startup with its storage key, the admin
//! page section it is shown in, the capability needed to see and change it,
//! and a render callback producing its form fragment. Request handling only
//! reads the frozen registry.

use std::fmt::Debug;

use comment_defaults_types::auth::AuthCtx;
use comment_defaults_types::types::ContentType;

use super::policy::PolicySettings;
use super::render::Templates;
use crate::prelude::*;
use crate::signing::ActionSigner;

/// Everything a render callback may look at. Built once per request.
pub struct RenderContext<'a> {
	pub actor: &'a AuthCtx,
	pub content_types: &'a [ContentType],
	pub policy: &'a PolicySettings,
	pub signer: &'a ActionSigner,
	pub templates: &'a Templates,
	/// Path of the admin page the fragment is rendered into
	pub page_path: &'a str,
}

/// Type alias for setting render callbacks
pub type SettingRenderer = Box<dyn Fn(&RenderContext<'_>) -> ClResult<String> + Send + Sync>;

/// Setting definition - declares a stored setting and how it is edited
pub struct SettingDefinition {
	/// Storage key in the settings store
	pub key: String,

	/// Field title shown on the admin page
	pub title: String,

	/// Admin page section (e.g., "discussion")
	pub section: String,

	/// Capability required to view and modify this setting
	pub capability: &'static str,

	pub renderer: SettingRenderer,
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("key", &self.key)
			.field("title", &self.title)
			.field("section", &self.section)
			.field("capability", &self.capability)
			.finish_non_exhaustive()
	}
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<String>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	title: Option<String>,
	section: String,
	capability: &'static str,
	renderer: Option<SettingRenderer>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			title: None,
			section: "general".into(),
			capability: comment_defaults_types::auth::CAP_MANAGE_OPTIONS,
			renderer: None,
		}
	}

	/// Set the title (required)
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn section(mut self, section: impl Into<String>) -> Self {
		self.section = section.into();
		self
	}

	pub fn capability(mut self, capability: &'static str) -> Self {
		self.capability = capability;
		self
	}

	/// Set the render callback (required)
	pub fn renderer<F>(mut self, f: F) -> Self
	where
		F: Fn(&RenderContext<'_>) -> ClResult<String> + Send + Sync + 'static,
	{
		self.renderer = Some(Box::new(f));
		self
	}

	pub fn build(self) -> ClResult<SettingDefinition> {
		let title =
			self.title.ok_or_else(|| Error::ConfigError("Setting title is required".into()))?;
		let renderer = self.renderer.ok_or_else(|| {
			Error::ConfigError(format!("Setting '{}' has no renderer", self.key))
		})?;

		Ok(SettingDefinition {
			key: self.key,
			title,
			section: self.section,
			capability: self.capability,
			renderer,
		})
	}
}

/// Mutable registry used during app initialization
#[derive(Debug, Default)]
pub struct SettingsRegistry {
	definitions: Vec<SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> ClResult<()> {
		if self.definitions.iter().any(|d| d.key == def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		debug!("Registering setting: {}", def.key);
		self.definitions.push(def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		info!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

/// Immutable registry stored in AppState
#[derive(Debug)]
pub struct FrozenSettingsRegistry {
	definitions: Vec<SettingDefinition>,
}

impl FrozenSettingsRegistry {
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.definitions.iter().find(|def| def.key == key)
	}

	/// Settings of one admin page section, in registration order
	pub fn section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a SettingDefinition> {
		self.definitions.iter().filter(move |def| def.section == section)
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}


// vim: ts=4
