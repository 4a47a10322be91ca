//! Discussion settings page
//!
//! The GET handler doubles as the batch trigger: a request carrying the batch
//! parameters is validated and, on success, redirected to the same page
//! without them. Rejected triggers render the page as if nothing happened.

use axum::{
	body::Bytes,
	extract::{OriginalUri, State},
	response::{Html, IntoResponse, Redirect, Response},
};

use crate::batch::{self, BatchError, BatchQuery, BatchRequest};
use crate::extract::Auth;
use crate::prelude::*;
use crate::signing::NONCE_PARAM;

use super::form::parse_policy_form;
use super::render::{Page, PageField, render_page};
use super::{RenderContext, SETTINGS_ACTION, SETTINGS_SECTION};

pub const PAGE_TITLE: &str = "Discussion Settings";

/// Query parameter set after a successful save
pub const UPDATED_PARAM: &str = "settings-updated";

/// True if the last `settings-updated` value in `query` is "true"
fn settings_updated(query: Option<&str>) -> bool {
	url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
		.filter(|(key, _)| key == UPDATED_PARAM)
		.last()
		.is_some_and(|(_, value)| value == "true")
}

/// GET admin page
///
/// The query string is read by hand: a malformed or repeated parameter must
/// not turn the page into an extractor rejection.
pub async fn get_discussion_page(
	State(app): State<App>,
	Auth(auth): Auth,
	OriginalUri(uri): OriginalUri,
) -> ClResult<Response> {
	let batch_query = BatchQuery::parse(uri.query());
	if batch_query.is_trigger() {
		let result = match BatchRequest::from_query(&batch_query) {
			Ok(request) => {
				batch::execute(app.meta_adapter.as_ref(), &app.signer, &request, &auth).await
			}
			Err(err) => Err(err),
		};

		match result {
			Ok(_) => return Ok(Redirect::to(&batch::strip_batch_params(&uri)).into_response()),
			Err(BatchError::Store(err)) => return Err(err),
			Err(err) => debug!(subject = %auth.id_tag, "Batch trigger ignored: {}", err),
		}
	}

	let content_types = app.settings.candidate_types().await?;
	let policy = app.settings.load().await;
	let ctx = RenderContext {
		actor: &auth,
		content_types: &content_types,
		policy: &policy,
		signer: &app.signer,
		templates: &app.templates,
		page_path: uri.path(),
	};

	let fields = app
		.settings_registry
		.section(SETTINGS_SECTION)
		.filter(|def| auth.can(def.capability))
		.map(|def| -> ClResult<PageField> {
			Ok(PageField { title: def.title.clone(), html: (def.renderer)(&ctx)? })
		})
		.collect::<ClResult<Vec<_>>>()?;

	let nonce = app.signer.create(SETTINGS_ACTION, &auth.id_tag)?;
	let html = render_page(&app.templates, &Page {
		title: PAGE_TITLE,
		action: uri.path(),
		nonce: &nonce,
		updated: settings_updated(uri.query()),
		fields,
	})?;

	Ok(Html(html).into_response())
}

/// POST admin page: saves the submitted policy mapping
pub async fn post_discussion_page(
	State(app): State<App>,
	Auth(auth): Auth,
	OriginalUri(uri): OriginalUri,
	body: Bytes,
) -> ClResult<Redirect> {
	if !auth.can(comment_defaults_types::auth::CAP_INSTALL_PLUGINS) {
		warn!(subject = %auth.id_tag, "Settings update denied");
		return Err(Error::PermissionDenied);
	}

	let nonce = url::form_urlencoded::parse(&body)
		.find(|(key, _)| key == NONCE_PARAM)
		.map(|(_, value)| value.into_owned())
		.unwrap_or_default();
	if !app.signer.verify(SETTINGS_ACTION, &auth.id_tag, &nonce) {
		warn!(subject = %auth.id_tag, "Settings update with invalid signature");
		return Err(Error::PermissionDenied);
	}

	let settings = parse_policy_form(&body);
	app.settings.save(&settings).await?;

	Ok(Redirect::to(&format!("{}?{}=true", uri.path(), UPDATED_PARAM)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_settings_updated() {
		assert!(settings_updated(Some("settings-updated=true")));
		assert!(settings_updated(Some("settings-updated=false&settings-updated=true")));
		assert!(!settings_updated(Some("settings-updated=true&settings-updated=1")));
		assert!(!settings_updated(Some("%zz&tab")));
		assert!(!settings_updated(None));
	}
}

// vim: ts=4
