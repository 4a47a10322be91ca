//! Per content type comment policy
//!
//! The stored shape is `{ "<type>": { "comment_status": <truthy> } }`. Values
//! written by the settings form arrive as `"0"` / `"1"`; older or hand-edited
//! values may be booleans or numbers. Coercion to `bool` happens once, here,
//! and a missing entry always reads as `false`.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Default comment policy for a single content type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePolicy {
	/// `true` closes comments and pings on newly created records of the type
	#[serde(default, deserialize_with = "deserialize_truthy")]
	pub comment_status: bool,
}

/// Content type name -> default comment policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicySettings(BTreeMap<Box<str>, TypePolicy>);

impl PolicySettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Policy for `content_type`, falling back to the no-override default
	pub fn get(&self, content_type: &str) -> TypePolicy {
		self.0.get(content_type).copied().unwrap_or_default()
	}

	/// Whether new records of `content_type` start with comments closed
	pub fn closes_comments(&self, content_type: &str) -> bool {
		self.get(content_type).comment_status
	}

	pub fn set(&mut self, content_type: impl Into<Box<str>>, comment_status: bool) {
		self.0.insert(content_type.into(), TypePolicy { comment_status });
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<K: Into<Box<str>>> FromIterator<(K, bool)> for PolicySettings {
	fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
		let mut settings = PolicySettings::new();
		for (name, comment_status) in iter {
			settings.set(name, comment_status);
		}
		settings
	}
}

/// Interprets a submitted or stored value as a boolean.
/// Empty strings, `"0"`, `0`, `false` and `null` are false; everything else is true.
pub fn is_truthy(value: &serde_json::Value) -> bool {
	match value {
		serde_json::Value::Null => false,
		serde_json::Value::Bool(b) => *b,
		serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
		serde_json::Value::String(s) => !s.is_empty() && s != "0",
		serde_json::Value::Array(a) => !a.is_empty(),
		serde_json::Value::Object(o) => !o.is_empty(),
	}
}

fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	Ok(is_truthy(&value))
}


// vim: ts=4
