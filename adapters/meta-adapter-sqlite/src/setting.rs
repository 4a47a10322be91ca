//! Settings key-value store management
//!
//! Handles persistent storage of settings as JSON values.

use sqlx::{Row, SqlitePool};

use crate::utils::inspect;
use comment_defaults::prelude::*;

/// Read a single setting by name
pub(crate) async fn read(db: &SqlitePool, name: &str) -> ClResult<Option<serde_json::Value>> {
	let row = sqlx::query("SELECT value FROM settings WHERE name = ?")
		.bind(name)
		.fetch_optional(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	let Some(row) = row else {
		return Ok(None);
	};
	let value: Option<String> = row.try_get("value").inspect_err(inspect).map_err(|_| Error::DbError)?;

	match value {
		Some(value) => {
			let json = serde_json::from_str(&value)
				.inspect_err(|err| warn!("Stored setting '{}' is not valid JSON: {}", name, err))?;
			Ok(Some(json))
		}
		None => Ok(None),
	}
}

/// Update or create a setting
pub(crate) async fn update(
	db: &SqlitePool,
	name: &str,
	value: Option<serde_json::Value>,
) -> ClResult<()> {
	if let Some(val) = value {
		let value_str = val.to_string();
		sqlx::query("INSERT OR REPLACE INTO settings (name, value) VALUES (?, ?)")
			.bind(name)
			.bind(value_str)
			.execute(db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
	} else {
		// Delete setting if value is None
		sqlx::query("DELETE FROM settings WHERE name = ?")
			.bind(name)
			.execute(db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
	}

	Ok(())
}

// vim: ts=4
