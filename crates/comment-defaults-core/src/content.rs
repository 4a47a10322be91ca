//! Record creation endpoints
//!
//! Both creation paths run the comment defaults before the record is
//! returned: regular content before it is persisted, attachments right after.

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::Deserialize;

use comment_defaults_types::auth::{CAP_EDIT_POSTS, CAP_UPLOAD_FILES};
use comment_defaults_types::meta_adapter::ListContentTypeOptions;
use comment_defaults_types::types::{ATTACHMENT_TYPE, ApiResponse, NewRecord, Record, RecordStatus};

use crate::defaults;
use crate::extract::Auth;
use crate::prelude::*;

#[derive(Debug, Deserialize)]
pub struct CreateRecordReq {
	#[serde(rename = "type")]
	pub post_type: String,
	pub title: String,
	#[serde(default)]
	pub status: RecordStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreateAttachmentReq {
	pub title: String,
}

async fn ensure_content_type(app: &App, post_type: &str) -> ClResult<()> {
	let types = app.meta_adapter.list_content_types(&ListContentTypeOptions::default()).await?;
	if types.iter().any(|t| t.name.as_ref() == post_type) {
		Ok(())
	} else {
		Err(Error::ValidationError(format!("unknown content type '{}'", post_type)))
	}
}

/// POST /api/records
pub async fn post_record(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreateRecordReq>,
) -> ClResult<(StatusCode, Json<ApiResponse<Record>>)> {
	if !auth.can(CAP_EDIT_POSTS) {
		return Err(Error::PermissionDenied);
	}
	if req.post_type == ATTACHMENT_TYPE {
		return Err(Error::ValidationError("attachments are created via /api/attachments".into()));
	}
	ensure_content_type(&app, &req.post_type).await?;

	let settings = app.settings.load().await;
	let mut record = NewRecord::new(req.post_type, req.title).status(req.status);
	defaults::on_new_content(&settings, &mut record);

	let record_id = app.meta_adapter.create_record(&record).await?;
	info!(subject = %auth.id_tag, %record_id, post_type = %record.post_type, "Record created");

	let record = app.meta_adapter.read_record(record_id).await?;
	Ok((StatusCode::CREATED, Json(ApiResponse::new(record))))
}

/// POST /api/attachments
pub async fn post_attachment(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreateAttachmentReq>,
) -> ClResult<(StatusCode, Json<ApiResponse<Record>>)> {
	if !auth.can(CAP_UPLOAD_FILES) {
		return Err(Error::PermissionDenied);
	}

	let record = NewRecord::new(ATTACHMENT_TYPE, req.title).status(RecordStatus::Inherit);
	let record_id = app.meta_adapter.create_record(&record).await?;
	info!(subject = %auth.id_tag, %record_id, "Attachment created");

	let settings = app.settings.load().await;
	defaults::on_new_attachment(app.meta_adapter.as_ref(), &settings, record_id).await?;

	let record = app.meta_adapter.read_record(record_id).await?;
	Ok((StatusCode::CREATED, Json(ApiResponse::new(record))))
}

/// GET /api/records/{record_id}
pub async fn get_record(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(record_id): Path<i64>,
) -> ClResult<Json<ApiResponse<Record>>> {
	if !auth.can(CAP_EDIT_POSTS) {
		return Err(Error::PermissionDenied);
	}

	let record = app.meta_adapter.read_record(RecordId(record_id)).await?;
	Ok(Json(ApiResponse::new(record)))
}

// vim: ts=4
