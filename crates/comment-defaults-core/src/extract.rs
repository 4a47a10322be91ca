//! Request extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use comment_defaults_types::auth::AuthCtx;

use crate::prelude::*;

// Auth //
//******//
/// Authenticated actor, inserted by `require_auth`
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts.extensions.get::<Auth>().cloned().ok_or(Error::Unauthorized)
	}
}

// vim: ts=4
