//! Shared utilities for SQLite adapter
//!
//! Error mapping and row decoding helpers used across all domain modules.

use comment_defaults::prelude::*;
use sqlx::{Row, sqlite::SqliteRow};

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a single-row query result, translating SQL errors to ClResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> ClResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> ClResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

/// Decode a text column through `FromStr`, reporting parse failures as decode errors
pub(crate) fn parse_col<T>(row: &SqliteRow, col: &str) -> Result<T, sqlx::Error>
where
	T: std::str::FromStr<Err = Error>,
{
	let value: &str = row.try_get(col)?;
	value.parse().map_err(|err: Error| sqlx::Error::Decode(Box::new(err)))
}

// vim: ts=4
