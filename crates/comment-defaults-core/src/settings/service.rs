//! Settings store for the comment policy mapping

use std::sync::Arc;

use comment_defaults_types::meta_adapter::{ListContentTypeOptions, MetaAdapter};
use comment_defaults_types::types::ContentType;

use super::SETTINGS_KEY;
use super::policy::{PolicySettings, TypePolicy};
use crate::prelude::*;

/// Reads and writes the policy mapping. Nothing is cached: every request
/// loads its own snapshot and passes it on explicitly.
#[derive(Debug, Clone)]
pub struct SettingsStore {
	meta: Arc<dyn MetaAdapter>,
}

impl SettingsStore {
	pub fn new(meta: Arc<dyn MetaAdapter>) -> Self {
		Self { meta }
	}

	/// Loads the current mapping. Missing, unreadable or malformed storage
	/// means "no overrides"; a malformed entry is skipped on its own.
	pub async fn load(&self) -> PolicySettings {
		let value = match self.meta.read_setting(SETTINGS_KEY).await {
			Ok(Some(value)) => value,
			Ok(None) => return PolicySettings::new(),
			Err(err) => {
				warn!("Cannot read setting '{}': {}", SETTINGS_KEY, err);
				return PolicySettings::new();
			}
		};

		let entries = match value {
			serde_json::Value::Object(entries) => entries,
			serde_json::Value::Null => return PolicySettings::new(),
			other => {
				warn!("Ignoring malformed setting '{}': not a mapping: {}", SETTINGS_KEY, other);
				return PolicySettings::new();
			}
		};

		// A broken entry only drops that type's override
		let mut settings = PolicySettings::new();
		for (content_type, entry) in entries {
			match serde_json::from_value::<TypePolicy>(entry) {
				Ok(policy) => settings.set(content_type, policy.comment_status),
				Err(err) => {
					warn!(
						content_type = %content_type,
						"Ignoring malformed entry in setting '{}': {}",
						SETTINGS_KEY,
						err
					);
				}
			}
		}
		settings
	}

	/// Replaces the stored mapping
	pub async fn save(&self, settings: &PolicySettings) -> ClResult<()> {
		let value = serde_json::to_value(settings)?;
		self.meta.update_setting(SETTINGS_KEY, Some(value)).await?;

		info!(types = settings.len(), "Setting '{}' updated", SETTINGS_KEY);
		Ok(())
	}

	/// Public content types offered on the settings page
	pub async fn candidate_types(&self) -> ClResult<Vec<ContentType>> {
		self.meta.list_content_types(&ListContentTypeOptions { public: Some(true) }).await
	}
}

// vim: ts=4
