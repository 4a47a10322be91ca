//! Adapter that stores settings, the content type registry and content records.
//!
//! The core crate never talks to a database directly; everything it reads or
//! writes goes through this trait.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::{ContentType, NewRecord, Record, RecordFilter, UpdateRecordFields};

#[derive(Debug, Default)]
pub struct ListContentTypeOptions {
	/// Only list types with the given visibility
	pub public: Option<bool>,
}

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	// Settings
	//**********

	/// Reads a setting value; `None` if it was never written
	async fn read_setting(&self, name: &str) -> ClResult<Option<serde_json::Value>>;

	/// Writes a setting value. `None` deletes it.
	async fn update_setting(&self, name: &str, value: Option<serde_json::Value>) -> ClResult<()>;

	// Content type registry
	//***********************
	async fn list_content_types(&self, opts: &ListContentTypeOptions) -> ClResult<Vec<ContentType>>;

	/// Registers a content type, replacing any previous registration of the same name
	async fn register_content_type(&self, content_type: &ContentType) -> ClResult<()>;

	// Records
	//*********
	async fn create_record(&self, record: &NewRecord) -> ClResult<RecordId>;

	async fn read_record(&self, record_id: RecordId) -> ClResult<Record>;

	/// Writes every mutable field of `record` back to the store
	async fn update_record(&self, record: &Record) -> ClResult<()>;

	/// Updates every record matching `filter` in a single statement.
	/// Returns the number of affected records.
	async fn update_records_where(
		&self,
		filter: &RecordFilter,
		fields: &UpdateRecordFields,
	) -> ClResult<u64>;
}

// vim: ts=4
