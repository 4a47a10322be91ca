//! Capability middleware

use axum::{
	extract::{Request, State},
	middleware::Next,
	response::Response,
};

use comment_defaults_types::auth::CAP_MANAGE_OPTIONS;

use crate::extract::Auth;
use crate::prelude::*;

/// Admin pages are only reachable for actors that may manage options.
/// Individual settings on the page may require more.
pub async fn require_manage_options(
	State(_app): State<App>,
	Auth(auth_ctx): Auth,
	req: Request,
	next: Next,
) -> Result<Response, Error> {
	if !auth_ctx.can(CAP_MANAGE_OPTIONS) {
		warn!(
			subject = %auth_ctx.id_tag,
			roles = ?auth_ctx.roles,
			"Admin permission denied - {} required",
			CAP_MANAGE_OPTIONS
		);
		return Err(Error::PermissionDenied);
	}

	Ok(next.run(req).await)
}

// vim: ts=4
