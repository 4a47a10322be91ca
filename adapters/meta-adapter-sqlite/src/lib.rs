//! SQLite implementation of the comment defaults `MetaAdapter`
//!
//! One database file (`meta.db`) holds the settings key-value table, the
//! content type registry and the content records.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use comment_defaults::{
	meta_adapter::{ListContentTypeOptions, MetaAdapter},
	prelude::*,
	types::{ContentType, NewRecord, Record, RecordFilter, UpdateRecordFields},
};

mod content_type;
mod record;
mod schema;
mod setting;
mod utils;

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	/// Opens (or creates) `meta.db` inside `dir` and brings the schema up to date
	pub async fn new(dir: impl AsRef<Path>) -> ClResult<Self> {
		tokio::fs::create_dir_all(dir.as_ref()).await?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(dir.as_ref().join("meta.db"))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl MetaAdapter for MetaAdapterSqlite {
	// Settings
	//**********
	async fn read_setting(&self, name: &str) -> ClResult<Option<serde_json::Value>> {
		setting::read(&self.db, name).await
	}

	async fn update_setting(&self, name: &str, value: Option<serde_json::Value>) -> ClResult<()> {
		setting::update(&self.db, name, value).await
	}

	// Content type registry
	//***********************
	async fn list_content_types(&self, opts: &ListContentTypeOptions) -> ClResult<Vec<ContentType>> {
		content_type::list(&self.db, opts).await
	}

	async fn register_content_type(&self, content_type: &ContentType) -> ClResult<()> {
		content_type::register(&self.db, content_type).await
	}

	// Records
	//*********
	async fn create_record(&self, record: &NewRecord) -> ClResult<RecordId> {
		record::create(&self.db, record).await
	}

	async fn read_record(&self, record_id: RecordId) -> ClResult<Record> {
		record::read(&self.db, record_id).await
	}

	async fn update_record(&self, record: &Record) -> ClResult<()> {
		record::update(&self.db, record).await
	}

	async fn update_records_where(
		&self,
		filter: &RecordFilter,
		fields: &UpdateRecordFields,
	) -> ClResult<u64> {
		record::update_where(&self.db, filter, fields).await
	}
}

// vim: ts=4
