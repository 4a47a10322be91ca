//! Content type registry

use sqlx::{Row, SqlitePool};

use crate::utils::{collect_res, inspect};
use comment_defaults::meta_adapter::ListContentTypeOptions;
use comment_defaults::prelude::*;
use comment_defaults::types::ContentType;

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListContentTypeOptions,
) -> ClResult<Vec<ContentType>> {
	let mut query = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
		"SELECT name, label, supports_comments, public FROM content_types",
	);
	if let Some(public) = opts.public {
		query.push(" WHERE public=").push_bind(public);
	}
	query.push(" ORDER BY rowid");

	let rows = query.build().fetch_all(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	collect_res(rows.iter().map(|row| -> Result<ContentType, sqlx::Error> {
		Ok(ContentType {
			name: row.try_get::<String, _>("name")?.into(),
			label: row.try_get::<String, _>("label")?.into(),
			supports_comments: row.try_get("supports_comments")?,
			public: row.try_get("public")?,
		})
	}))
}

pub(crate) async fn register(db: &SqlitePool, content_type: &ContentType) -> ClResult<()> {
	sqlx::query(
		"INSERT INTO content_types (name, label, supports_comments, public) VALUES (?, ?, ?, ?)
		ON CONFLICT(name) DO UPDATE SET label=excluded.label,
			supports_comments=excluded.supports_comments, public=excluded.public",
	)
	.bind(content_type.name.as_ref())
	.bind(content_type.label.as_ref())
	.bind(content_type.supports_comments)
	.bind(content_type.public)
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	debug!("Registered content type '{}'", content_type.name);
	Ok(())
}

// vim: ts=4
