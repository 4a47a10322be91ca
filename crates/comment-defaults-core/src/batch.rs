//! Batch update of the comment state of published records
//!
//! A batch is triggered from a signed admin link carrying the content type
//! and the target state. Validation happens in a fixed order (capability,
//! signature, target state) and any rejection leaves the store untouched.
//! The update itself is a single filtered statement in the store.

use axum::http::Uri;

use comment_defaults_types::auth::{AuthCtx, CAP_INSTALL_PLUGINS};
use comment_defaults_types::meta_adapter::MetaAdapter;
use comment_defaults_types::types::{
	CommentStatus, RecordFilter, RecordStatus, UpdateRecordFields,
};

use crate::prelude::*;
use crate::signing::{ActionSigner, NONCE_PARAM};

/// Action name the batch links are signed for
pub const BATCH_ACTION: &str = "comment_defaults_batch";
/// Query parameter carrying the target state
pub const BATCH_PARAM: &str = "comment_defaults_batch";
/// Query parameter carrying the content type
pub const POST_TYPE_PARAM: &str = "post_type";

/// Raw trigger parameters as found in the query string
#[derive(Debug, Default)]
pub struct BatchQuery {
	pub post_type: Option<String>,
	pub comment_defaults_batch: Option<String>,
	pub nonce: Option<String>,
	/// A trigger parameter appeared more than once
	pub repeated: bool,
}

impl BatchQuery {
	/// Reads the trigger parameters from a raw query string. Never fails:
	/// unrelated keys are ignored and a repeated trigger parameter is only
	/// flagged, so the request can be rejected like any other bad trigger.
	pub fn parse(query: Option<&str>) -> Self {
		let mut batch_query = Self::default();

		for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
			let slot = match key.as_ref() {
				POST_TYPE_PARAM => &mut batch_query.post_type,
				BATCH_PARAM => &mut batch_query.comment_defaults_batch,
				NONCE_PARAM => &mut batch_query.nonce,
				_ => continue,
			};
			if slot.replace(value.into_owned()).is_some() {
				batch_query.repeated = true;
			}
		}

		batch_query
	}

	/// True if the request tries to trigger a batch at all
	pub fn is_trigger(&self) -> bool {
		self.post_type.is_some() || self.comment_defaults_batch.is_some()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
	pub content_type: Box<str>,
	/// Validated only after the capability and signature checks
	pub target_state: Box<str>,
	pub auth_token: Box<str>,
}

impl BatchRequest {
	pub fn new(
		content_type: impl Into<Box<str>>,
		target_state: impl Into<Box<str>>,
		auth_token: impl Into<Box<str>>,
	) -> Self {
		Self {
			content_type: content_type.into(),
			target_state: target_state.into(),
			auth_token: auth_token.into(),
		}
	}

	/// Both trigger parameters must be present exactly once and non-empty.
	/// A missing signature is left for `execute` to reject.
	pub fn from_query(query: &BatchQuery) -> Result<Self, BatchError> {
		if query.repeated {
			return Err(BatchError::MissingParameters);
		}
		let content_type = query.post_type.as_deref().filter(|s| !s.is_empty());
		let target_state = query.comment_defaults_batch.as_deref().filter(|s| !s.is_empty());

		match (content_type, target_state) {
			(Some(content_type), Some(target_state)) => Ok(Self::new(
				content_type,
				target_state,
				query.nonce.as_deref().unwrap_or_default(),
			)),
			_ => Err(BatchError::MissingParameters),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
	pub content_type: Box<str>,
	pub target_state: CommentStatus,
	/// Records whose state actually changed
	pub affected: u64,
}

#[derive(Debug)]
pub enum BatchError {
	Unauthenticated,
	InvalidSignature,
	InvalidTargetState,
	MissingParameters,
	Store(Error),
}

impl std::fmt::Display for BatchError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			BatchError::Unauthenticated => write!(f, "actor may not run batch updates"),
			BatchError::InvalidSignature => write!(f, "invalid or expired signature"),
			BatchError::InvalidTargetState => write!(f, "target state must be open or closed"),
			BatchError::MissingParameters => write!(f, "missing batch parameters"),
			BatchError::Store(err) => write!(f, "store error: {}", err),
		}
	}
}

impl std::error::Error for BatchError {}

/// Validates `request` and applies its target state to every published
/// record of the requested type.
pub async fn execute(
	meta: &dyn MetaAdapter,
	signer: &ActionSigner,
	request: &BatchRequest,
	actor: &AuthCtx,
) -> Result<BatchOutcome, BatchError> {
	if !actor.can(CAP_INSTALL_PLUGINS) {
		return Err(BatchError::Unauthenticated);
	}
	if !signer.verify(BATCH_ACTION, &actor.id_tag, &request.auth_token) {
		return Err(BatchError::InvalidSignature);
	}
	let target_state: CommentStatus =
		request.target_state.parse().map_err(|_| BatchError::InvalidTargetState)?;

	let filter =
		RecordFilter { post_type: request.content_type.clone(), status: RecordStatus::Publish };
	let fields = UpdateRecordFields {
		comment_status: Some(target_state),
		ping_status: Some(target_state),
	};
	let affected = meta.update_records_where(&filter, &fields).await.map_err(BatchError::Store)?;

	info!(
		actor = %actor.id_tag,
		post_type = %request.content_type,
		state = %target_state,
		affected,
		"Batch comment update applied"
	);
	Ok(BatchOutcome { content_type: request.content_type.clone(), target_state, affected })
}

/// Path and query of `uri` without the batch trigger parameters
pub fn strip_batch_params(uri: &Uri) -> String {
	let path = uri.path();
	let Some(query) = uri.query() else {
		return path.to_string();
	};

	let mut serializer = url::form_urlencoded::Serializer::new(String::new());
	let mut kept = 0;
	for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
		if key == POST_TYPE_PARAM || key == BATCH_PARAM || key == NONCE_PARAM {
			continue;
		}
		serializer.append_pair(&key, &value);
		kept += 1;
	}

	if kept == 0 { path.to_string() } else { format!("{}?{}", path, serializer.finish()) }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn query(post_type: Option<&str>, state: Option<&str>, nonce: Option<&str>) -> BatchQuery {
		BatchQuery {
			post_type: post_type.map(String::from),
			comment_defaults_batch: state.map(String::from),
			nonce: nonce.map(String::from),
			repeated: false,
		}
	}

	#[test]
	fn test_from_query() {
		let req = BatchRequest::from_query(&query(Some("post"), Some("closed"), Some("sig"))).unwrap();
		assert_eq!(req, BatchRequest::new("post", "closed", "sig"));

		let req = BatchRequest::from_query(&query(Some("post"), Some("closed"), None)).unwrap();
		assert!(req.auth_token.is_empty());
	}

	#[test]
	fn test_from_query_missing_parameters() {
		for q in [
			query(None, Some("closed"), Some("sig")),
			query(Some("post"), None, Some("sig")),
			query(Some(""), Some("closed"), Some("sig")),
			query(Some("post"), Some(""), Some("sig")),
		] {
			assert!(matches!(BatchRequest::from_query(&q), Err(BatchError::MissingParameters)));
		}
		assert!(!BatchQuery::default().is_trigger());
		assert!(query(None, Some("open"), None).is_trigger());
	}

	#[test]
	fn test_parse_repeated_keys() {
		let q = BatchQuery::parse(Some(
			"post_type=post&post_type=page&comment_defaults_batch=closed&_nonce=abc",
		));
		assert!(q.repeated);
		assert!(q.is_trigger());
		assert!(matches!(BatchRequest::from_query(&q), Err(BatchError::MissingParameters)));

		let q = BatchQuery::parse(Some("tab=main&tab=x&post_type=post&comment_defaults_batch=closed&_nonce=a%2Bb"));
		assert!(!q.repeated);
		assert_eq!(BatchRequest::from_query(&q).unwrap(), BatchRequest::new("post", "closed", "a+b"));

		assert!(!BatchQuery::parse(None).is_trigger());
		assert!(!BatchQuery::parse(Some("settings-updated=true&settings-updated=true")).is_trigger());
	}

	#[test]
	fn test_strip_batch_params() {
		let uri: Uri =
			"/admin/discussion?post_type=post&comment_defaults_batch=closed&_nonce=abc".parse().unwrap();
		assert_eq!(strip_batch_params(&uri), "/admin/discussion");

		let uri: Uri = "/admin/discussion?tab=main&post_type=post&_nonce=abc".parse().unwrap();
		assert_eq!(strip_batch_params(&uri), "/admin/discussion?tab=main");

		let uri: Uri = "/admin/discussion".parse().unwrap();
		assert_eq!(strip_batch_params(&uri), "/admin/discussion");
	}
}

// vim: ts=4
