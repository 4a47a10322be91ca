//! Common types used throughout comment defaults.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::time::SystemTime;

use crate::prelude::*;

// RecordId //
//**********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub i64);

impl std::fmt::Display for RecordId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for RecordId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for RecordId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(RecordId(i64::deserialize(deserializer)?))
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
	}

	pub fn add_seconds(&self, seconds: i64) -> Timestamp {
		Timestamp(self.0.saturating_add(seconds))
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// CommentStatus //
//***************//
/// Acceptance state for comments (and, in lockstep, pings) on a record
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
	#[default]
	Open,
	Closed,
}

impl CommentStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			CommentStatus::Open => "open",
			CommentStatus::Closed => "closed",
		}
	}
}

impl std::fmt::Display for CommentStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for CommentStatus {
	type Err = Error;

	/// Only the exact lowercase names are accepted
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"open" => Ok(CommentStatus::Open),
			"closed" => Ok(CommentStatus::Closed),
			_ => Err(Error::ValidationError(format!("invalid comment status: {}", s))),
		}
	}
}

// RecordStatus //
//**************//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
	Publish,
	#[default]
	Draft,
	Pending,
	Private,
	Future,
	Trash,
	/// Attachments inherit the status of their parent
	Inherit,
}

impl RecordStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			RecordStatus::Publish => "publish",
			RecordStatus::Draft => "draft",
			RecordStatus::Pending => "pending",
			RecordStatus::Private => "private",
			RecordStatus::Future => "future",
			RecordStatus::Trash => "trash",
			RecordStatus::Inherit => "inherit",
		}
	}
}

impl std::str::FromStr for RecordStatus {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"publish" => Ok(RecordStatus::Publish),
			"draft" => Ok(RecordStatus::Draft),
			"pending" => Ok(RecordStatus::Pending),
			"private" => Ok(RecordStatus::Private),
			"future" => Ok(RecordStatus::Future),
			"trash" => Ok(RecordStatus::Trash),
			"inherit" => Ok(RecordStatus::Inherit),
			_ => Err(Error::ValidationError(format!("invalid record status: {}", s))),
		}
	}
}

// Content types //
//***************//
/// A registered content type as reported by the content type registry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
	pub name: Box<str>,
	pub label: Box<str>,
	pub supports_comments: bool,
	pub public: bool,
}

impl ContentType {
	pub fn new(name: impl Into<Box<str>>, label: impl Into<Box<str>>) -> Self {
		Self { name: name.into(), label: label.into(), supports_comments: true, public: true }
	}

	pub fn without_comments(mut self) -> Self {
		self.supports_comments = false;
		self
	}

	pub fn private(mut self) -> Self {
		self.public = false;
		self
	}
}

// Records //
//*********//
pub const ATTACHMENT_TYPE: &str = "attachment";

/// A stored content record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
	pub record_id: RecordId,
	#[serde(rename = "type")]
	pub post_type: Box<str>,
	pub title: Box<str>,
	pub status: RecordStatus,
	pub comment_status: CommentStatus,
	pub ping_status: CommentStatus,
	pub created_at: Timestamp,
}

/// A record that has been initialized but not yet persisted
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecord {
	pub post_type: Box<str>,
	pub title: Box<str>,
	pub status: RecordStatus,
	pub comment_status: CommentStatus,
	pub ping_status: CommentStatus,
}

impl NewRecord {
	/// Initializes a record with the store's own defaults (comments and pings open)
	pub fn new(post_type: impl Into<Box<str>>, title: impl Into<Box<str>>) -> Self {
		Self {
			post_type: post_type.into(),
			title: title.into(),
			status: RecordStatus::default(),
			comment_status: CommentStatus::Open,
			ping_status: CommentStatus::Open,
		}
	}

	pub fn status(mut self, status: RecordStatus) -> Self {
		self.status = status;
		self
	}
}

/// Filter for bulk record updates; every condition must match
#[derive(Clone, Debug)]
pub struct RecordFilter {
	pub post_type: Box<str>,
	pub status: RecordStatus,
}

/// Fields written by a bulk record update. `None` leaves the column untouched.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordFields {
	pub comment_status: Option<CommentStatus>,
	pub ping_status: Option<CommentStatus>,
}

impl UpdateRecordFields {
	pub fn is_empty(&self) -> bool {
		self.comment_status.is_none() && self.ping_status.is_none()
	}
}

// API response //
//**************//
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
	pub data: T,
	pub time: Timestamp,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, time: Timestamp::now() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Deserialize)]
	struct StateQuery {
		state: CommentStatus,
	}

	#[test]
	fn test_comment_status_parse() {
		assert_eq!("open".parse::<CommentStatus>().ok(), Some(CommentStatus::Open));
		assert_eq!("closed".parse::<CommentStatus>().ok(), Some(CommentStatus::Closed));
		assert!("Closed".parse::<CommentStatus>().is_err());
		assert!("".parse::<CommentStatus>().is_err());
		assert!("1".parse::<CommentStatus>().is_err());
	}

	#[test]
	fn test_comment_status_from_query() {
		let q: StateQuery = serde_urlencoded::from_str("state=closed").unwrap();
		assert_eq!(q.state, CommentStatus::Closed);
		assert!(serde_urlencoded::from_str::<StateQuery>("state=shut").is_err());
	}

	#[test]
	fn test_record_status_roundtrip() {
		for status in [
			RecordStatus::Publish,
			RecordStatus::Draft,
			RecordStatus::Pending,
			RecordStatus::Private,
			RecordStatus::Future,
			RecordStatus::Trash,
			RecordStatus::Inherit,
		] {
			assert_eq!(status.as_str().parse::<RecordStatus>().ok(), Some(status));
		}
	}

	#[test]
	fn test_api_response_shape() {
		let value = serde_json::to_value(ApiResponse::new(1)).unwrap();
		let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["data", "time"]);
	}

	#[test]
	fn test_new_record_defaults_open() {
		let record = NewRecord::new("post", "Hello");
		assert_eq!(record.comment_status, CommentStatus::Open);
		assert_eq!(record.ping_status, CommentStatus::Open);
		assert_eq!(record.status, RecordStatus::Draft);
	}

	#[test]
	fn test_record_serializes_type() {
		let record = Record {
			record_id: RecordId(7),
			post_type: "page".into(),
			title: "About".into(),
			status: RecordStatus::Publish,
			comment_status: CommentStatus::Closed,
			ping_status: CommentStatus::Open,
			created_at: Timestamp(1),
		};
		let json = serde_json::to_value(&record).unwrap();
		assert_eq!(json["recordId"], 7);
		assert_eq!(json["type"], "page");
		assert_eq!(json["commentStatus"], "closed");
		assert_eq!(json["status"], "publish");
	}
}

// vim: ts=4
