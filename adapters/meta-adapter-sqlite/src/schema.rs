//! Database schema initialization
//!
//! Creates tables and indexes and registers the built-in content types.

use sqlx::SqlitePool;

/// Built-in content types: (name, label)
const BUILTIN_CONTENT_TYPES: &[(&str, &str)] =
	&[("post", "Posts"), ("page", "Pages"), ("attachment", "Media")];

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Settings
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
		name text NOT NULL,
		value text,
		PRIMARY KEY(name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Content types
	//***************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS content_types (
		name text NOT NULL,
		label text NOT NULL,
		supports_comments boolean NOT NULL DEFAULT 1,
		public boolean NOT NULL DEFAULT 1,
		PRIMARY KEY(name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	for (name, label) in BUILTIN_CONTENT_TYPES {
		sqlx::query("INSERT OR IGNORE INTO content_types (name, label) VALUES (?, ?)")
			.bind(name)
			.bind(label)
			.execute(&mut *tx)
			.await?;
	}

	// Records
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS records (
		record_id integer PRIMARY KEY AUTOINCREMENT,
		type text NOT NULL,
		title text NOT NULL DEFAULT '',
		status text NOT NULL DEFAULT 'draft',
		comment_status text NOT NULL DEFAULT 'open',
		ping_status text NOT NULL DEFAULT 'open',
		created_at integer NOT NULL DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_records_type_status ON records(type, status)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
