//! Content record storage
//!
//! Single-record CRUD plus the filtered bulk update used by batch operations.
//! All values are bound as parameters; nothing is formatted into SQL text.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::{inspect, map_res, parse_col};
use comment_defaults::prelude::*;
use comment_defaults::types::{NewRecord, Record, RecordFilter, UpdateRecordFields};

fn record_from_row(row: &SqliteRow) -> Result<Record, sqlx::Error> {
	Ok(Record {
		record_id: RecordId(row.try_get("record_id")?),
		post_type: row.try_get::<String, _>("type")?.into(),
		title: row.try_get::<String, _>("title")?.into(),
		status: parse_col(row, "status")?,
		comment_status: parse_col(row, "comment_status")?,
		ping_status: parse_col(row, "ping_status")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(db: &SqlitePool, record: &NewRecord) -> ClResult<RecordId> {
	let res = sqlx::query(
		"INSERT INTO records (type, title, status, comment_status, ping_status, created_at)
		VALUES (?, ?, ?, ?, ?, unixepoch()) RETURNING record_id",
	)
	.bind(record.post_type.as_ref())
	.bind(record.title.as_ref())
	.bind(record.status.as_str())
	.bind(record.comment_status.as_str())
	.bind(record.ping_status.as_str())
	.fetch_one(db)
	.await;

	map_res(res, |row| row.try_get("record_id").map(RecordId))
}

pub(crate) async fn read(db: &SqlitePool, record_id: RecordId) -> ClResult<Record> {
	let res = sqlx::query(
		"SELECT record_id, type, title, status, comment_status, ping_status, created_at
		FROM records WHERE record_id = ?",
	)
	.bind(record_id.0)
	.fetch_one(db)
	.await;

	map_res(res, |row| record_from_row(&row))
}

pub(crate) async fn update(db: &SqlitePool, record: &Record) -> ClResult<()> {
	let res = sqlx::query(
		"UPDATE records SET type=?, title=?, status=?, comment_status=?, ping_status=?
		WHERE record_id=?",
	)
	.bind(record.post_type.as_ref())
	.bind(record.title.as_ref())
	.bind(record.status.as_str())
	.bind(record.comment_status.as_str())
	.bind(record.ping_status.as_str())
	.bind(record.record_id.0)
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

/// Bulk update in one statement.
///
/// Rows that already hold every target value are excluded, so the returned
/// count is the number of records actually changed.
pub(crate) async fn update_where(
	db: &SqlitePool,
	filter: &RecordFilter,
	fields: &UpdateRecordFields,
) -> ClResult<u64> {
	if fields.is_empty() {
		return Ok(0);
	}

	let mut query = sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE records SET ");
	{
		let mut set = query.separated(", ");
		if let Some(comment_status) = fields.comment_status {
			set.push("comment_status=").push_bind_unseparated(comment_status.as_str());
		}
		if let Some(ping_status) = fields.ping_status {
			set.push("ping_status=").push_bind_unseparated(ping_status.as_str());
		}
	}

	query
		.push(" WHERE type=")
		.push_bind(filter.post_type.to_string())
		.push(" AND status=")
		.push_bind(filter.status.as_str());

	query.push(" AND (");
	{
		let mut changed = query.separated(" OR ");
		if let Some(comment_status) = fields.comment_status {
			changed.push("comment_status IS NOT ").push_bind_unseparated(comment_status.as_str());
		}
		if let Some(ping_status) = fields.ping_status {
			changed.push("ping_status IS NOT ").push_bind_unseparated(ping_status.as_str());
		}
	}
	query.push(")");

	debug!("SQL: {}", query.sql());
	let res =
		query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	Ok(res.rows_affected())
}

// vim: ts=4
