//! Shared test fixtures: an in-memory `MetaAdapter` and app helpers

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use comment_defaults_core::app::{App, AppBuilder};
use comment_defaults_core::signing::ActionSigner;
use comment_defaults_types::auth::{AuthCtx, ROLE_ADMIN, ROLE_EDITOR};
use comment_defaults_types::error::{ClResult, Error};
use comment_defaults_types::meta_adapter::{ListContentTypeOptions, MetaAdapter};
use comment_defaults_types::types::{
	CommentStatus, ContentType, NewRecord, Record, RecordFilter, RecordId, RecordStatus,
	Timestamp, UpdateRecordFields,
};

pub const SIGNING_KEY: &[u8] = b"test signing key";
pub const JWT_SECRET: &[u8] = b"test jwt secret";
pub const NONCE_LIFETIME: u64 = 3600;

#[derive(Debug, Default)]
struct Inner {
	settings: HashMap<String, serde_json::Value>,
	content_types: Vec<ContentType>,
	records: BTreeMap<i64, Record>,
	next_id: i64,
	update_where_calls: usize,
	record_writes: usize,
}

#[derive(Debug, Default)]
pub struct MemoryMetaAdapter {
	inner: Mutex<Inner>,
	/// Makes every store call fail with `Error::DbError`
	pub broken: bool,
}

impl MemoryMetaAdapter {
	/// Store with the usual post, page and attachment types
	pub fn new() -> Self {
		let adapter = Self::default();
		{
			let mut inner = adapter.inner.lock();
			inner.content_types = vec![
				ContentType::new("post", "Posts"),
				ContentType::new("page", "Pages"),
				ContentType::new("attachment", "Media"),
			];
		}
		adapter
	}

	pub fn broken() -> Self {
		Self { broken: true, ..Self::new() }
	}

	pub fn add_content_type(&self, content_type: ContentType) {
		self.inner.lock().content_types.push(content_type);
	}

	pub fn set_raw_setting(&self, name: &str, value: serde_json::Value) {
		self.inner.lock().settings.insert(name.to_string(), value);
	}

	pub fn raw_setting(&self, name: &str) -> Option<serde_json::Value> {
		self.inner.lock().settings.get(name).cloned()
	}

	pub fn seed(&self, post_type: &str, status: RecordStatus) -> RecordId {
		let mut inner = self.inner.lock();
		inner.next_id += 1;
		let record_id = RecordId(inner.next_id);
		inner.records.insert(
			record_id.0,
			Record {
				record_id,
				post_type: post_type.into(),
				title: format!("{} {}", post_type, status.as_str()).into(),
				status,
				comment_status: CommentStatus::Open,
				ping_status: CommentStatus::Open,
				created_at: Timestamp(1_700_000_000),
			},
		);
		record_id
	}

	pub fn record(&self, record_id: RecordId) -> Option<Record> {
		self.inner.lock().records.get(&record_id.0).cloned()
	}

	pub fn records(&self) -> Vec<Record> {
		self.inner.lock().records.values().cloned().collect()
	}

	pub fn update_where_calls(&self) -> usize {
		self.inner.lock().update_where_calls
	}

	pub fn record_writes(&self) -> usize {
		self.inner.lock().record_writes
	}

	fn check(&self) -> ClResult<()> {
		if self.broken { Err(Error::DbError) } else { Ok(()) }
	}
}

#[async_trait]
impl MetaAdapter for MemoryMetaAdapter {
	async fn read_setting(&self, name: &str) -> ClResult<Option<serde_json::Value>> {
		self.check()?;
		Ok(self.inner.lock().settings.get(name).cloned())
	}

	async fn update_setting(&self, name: &str, value: Option<serde_json::Value>) -> ClResult<()> {
		self.check()?;
		let mut inner = self.inner.lock();
		match value {
			Some(value) => inner.settings.insert(name.to_string(), value),
			None => inner.settings.remove(name),
		};
		Ok(())
	}

	async fn list_content_types(&self, opts: &ListContentTypeOptions) -> ClResult<Vec<ContentType>> {
		self.check()?;
		Ok(self
			.inner
			.lock()
			.content_types
			.iter()
			.filter(|t| opts.public.is_none_or(|public| t.public == public))
			.cloned()
			.collect())
	}

	async fn register_content_type(&self, content_type: &ContentType) -> ClResult<()> {
		self.check()?;
		let mut inner = self.inner.lock();
		inner.content_types.retain(|t| t.name != content_type.name);
		inner.content_types.push(content_type.clone());
		Ok(())
	}

	async fn create_record(&self, record: &NewRecord) -> ClResult<RecordId> {
		self.check()?;
		let mut inner = self.inner.lock();
		inner.next_id += 1;
		let record_id = RecordId(inner.next_id);
		inner.records.insert(
			record_id.0,
			Record {
				record_id,
				post_type: record.post_type.clone(),
				title: record.title.clone(),
				status: record.status,
				comment_status: record.comment_status,
				ping_status: record.ping_status,
				created_at: Timestamp::now(),
			},
		);
		Ok(record_id)
	}

	async fn read_record(&self, record_id: RecordId) -> ClResult<Record> {
		self.check()?;
		self.inner.lock().records.get(&record_id.0).cloned().ok_or(Error::NotFound)
	}

	async fn update_record(&self, record: &Record) -> ClResult<()> {
		self.check()?;
		let mut inner = self.inner.lock();
		let stored = inner.records.get_mut(&record.record_id.0).ok_or(Error::NotFound)?;
		*stored = record.clone();
		inner.record_writes += 1;
		Ok(())
	}

	async fn update_records_where(
		&self,
		filter: &RecordFilter,
		fields: &UpdateRecordFields,
	) -> ClResult<u64> {
		self.check()?;
		let mut inner = self.inner.lock();
		inner.update_where_calls += 1;

		let mut affected = 0;
		for record in inner.records.values_mut() {
			if record.post_type != filter.post_type || record.status != filter.status {
				continue;
			}
			let before = (record.comment_status, record.ping_status);
			if let Some(state) = fields.comment_status {
				record.comment_status = state;
			}
			if let Some(state) = fields.ping_status {
				record.ping_status = state;
			}
			if before != (record.comment_status, record.ping_status) {
				affected += 1;
			}
		}
		Ok(affected)
	}
}

pub fn admin() -> AuthCtx {
	AuthCtx::new("admin", &[ROLE_ADMIN])
}

pub fn editor() -> AuthCtx {
	AuthCtx::new("editor", &[ROLE_EDITOR])
}

pub fn signer() -> ActionSigner {
	ActionSigner::new(SIGNING_KEY.to_vec(), NONCE_LIFETIME).unwrap()
}

pub fn test_app(meta: Arc<MemoryMetaAdapter>) -> App {
	let mut builder = AppBuilder::new();
	builder
		.signing_key(SIGNING_KEY.to_vec())
		.jwt_secret(JWT_SECRET.to_vec())
		.nonce_lifetime(NONCE_LIFETIME)
		.meta_adapter(meta);
	builder.build().unwrap()
}

// vim: ts=4
