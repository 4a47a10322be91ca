//! Settings form submission parsing
//!
//! Each type is posted twice: a hidden `0` followed by the checkbox `1` when
//! checked. The last value for a field wins, so every rendered type ends up
//! present as either `false` or `true`.

use super::SETTINGS_KEY;
use super::policy::{PolicySettings, is_truthy};

/// Extracts `<type>` from `comment_defaults_settings[<type>][comment_status]`
fn policy_field_type(field: &str) -> Option<&str> {
	let name = field
		.strip_prefix(SETTINGS_KEY)?
		.strip_prefix('[')?
		.strip_suffix("][comment_status]")?;

	if name.is_empty() || name.contains(['[', ']']) { None } else { Some(name) }
}

/// Builds the policy mapping from an urlencoded form body. Unrelated fields are ignored.
pub fn parse_policy_form(body: &[u8]) -> PolicySettings {
	let mut settings = PolicySettings::new();

	for (field, value) in url::form_urlencoded::parse(body) {
		if let Some(name) = policy_field_type(&field) {
			settings.set(name, is_truthy(&serde_json::Value::String(value.into_owned())));
		}
	}

	settings
}


// vim: ts=4
