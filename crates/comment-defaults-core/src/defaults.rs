//! Creation-time comment defaults

use comment_defaults_types::meta_adapter::MetaAdapter;
use comment_defaults_types::types::{CommentStatus, NewRecord};

use crate::prelude::*;
use crate::settings::PolicySettings;

/// Closes both statuses if the policy of `post_type` asks for it.
/// Returns true if a status changed.
fn apply_policy(
	settings: &PolicySettings,
	post_type: &str,
	comment_status: &mut CommentStatus,
	ping_status: &mut CommentStatus,
) -> bool {
	if !settings.closes_comments(post_type) {
		return false;
	}

	let changed = *comment_status != CommentStatus::Closed || *ping_status != CommentStatus::Closed;
	*comment_status = CommentStatus::Closed;
	*ping_status = CommentStatus::Closed;
	changed
}

/// Hook for a record that is about to be persisted
pub fn on_new_content(settings: &PolicySettings, record: &mut NewRecord) -> bool {
	let changed = apply_policy(
		settings,
		&record.post_type,
		&mut record.comment_status,
		&mut record.ping_status,
	);
	if changed {
		debug!(post_type = %record.post_type, "Comments closed by default");
	}
	changed
}

/// Hook for an attachment that has already been stored. The record is only
/// written back if its state changed.
pub async fn on_new_attachment(
	meta: &dyn MetaAdapter,
	settings: &PolicySettings,
	record_id: RecordId,
) -> ClResult<bool> {
	let mut record = meta.read_record(record_id).await?;

	let changed = apply_policy(
		settings,
		&record.post_type,
		&mut record.comment_status,
		&mut record.ping_status,
	);
	if changed {
		meta.update_record(&record).await?;
		debug!(%record_id, post_type = %record.post_type, "Attachment comments closed by default");
	}
	Ok(changed)
}


// vim: ts=4
