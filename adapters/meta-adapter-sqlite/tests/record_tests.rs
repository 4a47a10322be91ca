//! Record storage and filtered update tests

use comment_defaults::error::Error;
use comment_defaults::meta_adapter::MetaAdapter;
use comment_defaults::types::{
	CommentStatus, NewRecord, RecordFilter, RecordId, RecordStatus, UpdateRecordFields,
};
use comment_defaults_meta_adapter_sqlite::MetaAdapterSqlite;
use tempfile::TempDir;

async fn create_test_adapter() -> (MetaAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = MetaAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create adapter");

	(adapter, temp_dir)
}

async fn seed(adapter: &MetaAdapterSqlite, typ: &str, status: RecordStatus) -> RecordId {
	adapter
		.create_record(&NewRecord::new(typ, format!("{} {}", typ, status.as_str())).status(status))
		.await
		.expect("Should create record")
}

fn close_all() -> UpdateRecordFields {
	UpdateRecordFields {
		comment_status: Some(CommentStatus::Closed),
		ping_status: Some(CommentStatus::Closed),
	}
}

#[tokio::test]
async fn test_create_and_read_record() {
	let (adapter, _temp) = create_test_adapter().await;

	let mut new_record = NewRecord::new("post", "Hello").status(RecordStatus::Publish);
	new_record.ping_status = CommentStatus::Closed;
	let id = adapter.create_record(&new_record).await.expect("Should create");

	let record = adapter.read_record(id).await.expect("Should read");
	assert_eq!(record.record_id, id);
	assert_eq!(record.post_type.as_ref(), "post");
	assert_eq!(record.title.as_ref(), "Hello");
	assert_eq!(record.status, RecordStatus::Publish);
	assert_eq!(record.comment_status, CommentStatus::Open);
	assert_eq!(record.ping_status, CommentStatus::Closed);
	assert!(record.created_at.0 > 0);
}

#[tokio::test]
async fn test_read_missing_record() {
	let (adapter, _temp) = create_test_adapter().await;

	assert!(matches!(adapter.read_record(RecordId(999)).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_update_record() {
	let (adapter, _temp) = create_test_adapter().await;
	let id = seed(&adapter, "attachment", RecordStatus::Inherit).await;

	let mut record = adapter.read_record(id).await.expect("Should read");
	record.comment_status = CommentStatus::Closed;
	record.ping_status = CommentStatus::Closed;
	adapter.update_record(&record).await.expect("Should update");

	let stored = adapter.read_record(id).await.expect("Should read");
	assert_eq!(stored, record);
}

#[tokio::test]
async fn test_update_missing_record() {
	let (adapter, _temp) = create_test_adapter().await;
	let id = seed(&adapter, "post", RecordStatus::Draft).await;
	let mut record = adapter.read_record(id).await.expect("Should read");
	record.record_id = RecordId(id.0 + 100);

	assert!(matches!(adapter.update_record(&record).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_update_where_only_touches_matching_records() {
	let (adapter, _temp) = create_test_adapter().await;

	let published = [
		seed(&adapter, "post", RecordStatus::Publish).await,
		seed(&adapter, "post", RecordStatus::Publish).await,
	];
	let untouched = [
		seed(&adapter, "post", RecordStatus::Draft).await,
		seed(&adapter, "post", RecordStatus::Trash).await,
		seed(&adapter, "post", RecordStatus::Future).await,
		seed(&adapter, "page", RecordStatus::Publish).await,
	];

	let filter = RecordFilter { post_type: "post".into(), status: RecordStatus::Publish };
	let affected = adapter.update_records_where(&filter, &close_all()).await.expect("Should update");
	assert_eq!(affected, 2);

	for id in published {
		let record = adapter.read_record(id).await.expect("Should read");
		assert_eq!(record.comment_status, CommentStatus::Closed);
		assert_eq!(record.ping_status, CommentStatus::Closed);
	}
	for id in untouched {
		let record = adapter.read_record(id).await.expect("Should read");
		assert_eq!(record.comment_status, CommentStatus::Open);
		assert_eq!(record.ping_status, CommentStatus::Open);
	}
}

#[tokio::test]
async fn test_update_where_is_idempotent() {
	let (adapter, _temp) = create_test_adapter().await;
	let id = seed(&adapter, "post", RecordStatus::Publish).await;
	let filter = RecordFilter { post_type: "post".into(), status: RecordStatus::Publish };

	assert_eq!(adapter.update_records_where(&filter, &close_all()).await.expect("first"), 1);
	let after_first = adapter.read_record(id).await.expect("Should read");

	assert_eq!(adapter.update_records_where(&filter, &close_all()).await.expect("second"), 0);
	let after_second = adapter.read_record(id).await.expect("Should read");

	assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn test_update_where_counts_partially_closed_records() {
	let (adapter, _temp) = create_test_adapter().await;
	let mut new_record = NewRecord::new("post", "Half").status(RecordStatus::Publish);
	new_record.comment_status = CommentStatus::Closed;
	let id = adapter.create_record(&new_record).await.expect("Should create");

	let filter = RecordFilter { post_type: "post".into(), status: RecordStatus::Publish };
	assert_eq!(adapter.update_records_where(&filter, &close_all()).await.expect("update"), 1);
	assert_eq!(adapter.read_record(id).await.expect("read").ping_status, CommentStatus::Closed);
}

#[tokio::test]
async fn test_update_where_treats_type_as_data() {
	let (adapter, _temp) = create_test_adapter().await;
	let id = seed(&adapter, "post", RecordStatus::Publish).await;

	let filter =
		RecordFilter { post_type: "post' OR '1'='1".into(), status: RecordStatus::Publish };
	let affected = adapter.update_records_where(&filter, &close_all()).await.expect("update");

	assert_eq!(affected, 0);
	assert_eq!(adapter.read_record(id).await.expect("read").comment_status, CommentStatus::Open);
}

#[tokio::test]
async fn test_update_where_without_fields() {
	let (adapter, _temp) = create_test_adapter().await;
	seed(&adapter, "post", RecordStatus::Publish).await;
	let filter = RecordFilter { post_type: "post".into(), status: RecordStatus::Publish };

	let affected =
		adapter.update_records_where(&filter, &UpdateRecordFields::default()).await.expect("noop");
	assert_eq!(affected, 0);
}

// vim: ts=4
