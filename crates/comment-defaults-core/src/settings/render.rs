//! HTML fragments for the discussion settings page

use handlebars::Handlebars;
use serde::Serialize;

use comment_defaults_types::types::{CommentStatus, ContentType};

use super::SETTINGS_KEY;
use super::policy::PolicySettings;
use crate::batch::{BATCH_ACTION, BATCH_PARAM, POST_TYPE_PARAM};
use crate::prelude::*;
use crate::signing::{ActionSigner, NONCE_PARAM};

pub const POLICY_INTRO: &str = "Disable comments by default for these post types:";
pub const NO_TYPES_MESSAGE: &str = "No post types with comment support were found.";

const POLICY_FIELD_TEMPLATE: &str = r#"<fieldset>
	<p>{{intro}}</p>
	{{#if fields}}{{#each fields}}{{#unless @first}}<br />
	{{/unless}}<label>
		<input type="hidden" name="{{input_name}}" value="0" />
		<input type="checkbox" name="{{input_name}}" value="1"{{#if checked}} checked="checked"{{/if}} /> {{label}}
	</label>{{/each}}{{else}}{{empty}}{{/if}}
</fieldset>"#;

const BATCH_LINKS_TEMPLATE: &str = r#"<div class="comment-defaults-batch">
	<ul>{{#each links}}
		<li><a href="{{close_url}}">Close comments on all published {{label}}</a> | <a href="{{open_url}}">Open comments on all published {{label}}</a></li>{{/each}}
	</ul>
</div>"#;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8" /><title>{{title}}</title></head>
<body>
<h1>{{title}}</h1>
{{#if updated}}<p class="notice">Settings saved.</p>
{{/if}}<form method="post" action="{{action}}">
<input type="hidden" name="{{nonce_param}}" value="{{nonce}}" />
<table class="form-table">
{{#each fields}}<tr><th scope="row">{{title}}</th><td>{{{html}}}</td></tr>
{{/each}}</table>
{{#if fields}}<p><input type="submit" value="Save Changes" /></p>
{{/if}}</form>
</body>
</html>"#;

pub const POLICY_FIELD: &str = "policy_field";
pub const BATCH_LINKS: &str = "batch_links";
pub const PAGE: &str = "page";

/// Compiled admin page templates, built once per app
pub struct Templates {
	handlebars: Handlebars<'static>,
}

impl Templates {
	pub fn new() -> ClResult<Self> {
		let mut handlebars = Handlebars::new();
		handlebars.set_strict_mode(true);

		for (name, template) in [
			(POLICY_FIELD, POLICY_FIELD_TEMPLATE),
			(BATCH_LINKS, BATCH_LINKS_TEMPLATE),
			(PAGE, PAGE_TEMPLATE),
		] {
			handlebars.register_template_string(name, template).map_err(|err| {
				Error::ConfigError(format!("Invalid template '{}': {}", name, err))
			})?;
		}

		Ok(Self { handlebars })
	}

	pub fn render<T: Serialize>(&self, name: &str, data: &T) -> ClResult<String> {
		self.handlebars.render(name, data).map_err(|err| {
			Error::ConfigError(format!("Template '{}' rendering failed: {}", name, err))
		})
	}
}

/// Types that can carry a comment policy
pub fn eligible_types(content_types: &[ContentType]) -> impl Iterator<Item = &ContentType> {
	content_types.iter().filter(|t| t.supports_comments)
}

#[derive(Serialize)]
struct PolicyField<'a> {
	input_name: String,
	label: &'a str,
	checked: bool,
}

/// Checkbox per comment-capable type, pre-checked from `policy`
pub fn render_policy_field(
	templates: &Templates,
	content_types: &[ContentType],
	policy: &PolicySettings,
) -> ClResult<String> {
	let fields: Vec<PolicyField> = eligible_types(content_types)
		.map(|t| PolicyField {
			input_name: format!("{}[{}][comment_status]", SETTINGS_KEY, t.name),
			label: &t.label,
			checked: policy.closes_comments(&t.name),
		})
		.collect();

	templates.render(
		POLICY_FIELD,
		&serde_json::json!({ "intro": POLICY_INTRO, "empty": NO_TYPES_MESSAGE, "fields": fields }),
	)
}

#[derive(Serialize)]
struct BatchLink<'a> {
	label: &'a str,
	open_url: String,
	close_url: String,
}

/// URL of the batch trigger for one type and target state, without signature
pub fn batch_url(page_path: &str, content_type: &str, target_state: CommentStatus) -> String {
	let query = url::form_urlencoded::Serializer::new(String::new())
		.append_pair(POST_TYPE_PARAM, content_type)
		.append_pair(BATCH_PARAM, target_state.as_str())
		.finish();
	format!("{}?{}", page_path, query)
}

/// Signed open/close links per comment-capable type
pub fn render_batch_links(
	templates: &Templates,
	content_types: &[ContentType],
	signer: &ActionSigner,
	actor: &str,
	page_path: &str,
) -> ClResult<String> {
	let links = eligible_types(content_types)
		.map(|t| -> ClResult<BatchLink<'_>> {
			Ok(BatchLink {
				label: &t.label,
				open_url: signer.sign_url(
					BATCH_ACTION,
					actor,
					&batch_url(page_path, &t.name, CommentStatus::Open),
				)?,
				close_url: signer.sign_url(
					BATCH_ACTION,
					actor,
					&batch_url(page_path, &t.name, CommentStatus::Closed),
				)?,
			})
		})
		.collect::<ClResult<Vec<_>>>()?;

	if links.is_empty() {
		return Ok(String::new());
	}
	templates.render(BATCH_LINKS, &serde_json::json!({ "links": links }))
}

#[derive(Serialize)]
pub struct PageField {
	pub title: String,
	/// Already rendered HTML
	pub html: String,
}

pub struct Page<'a> {
	pub title: &'a str,
	pub action: &'a str,
	pub nonce: &'a str,
	pub updated: bool,
	pub fields: Vec<PageField>,
}

pub fn render_page(templates: &Templates, page: &Page<'_>) -> ClResult<String> {
	templates.render(
		PAGE,
		&serde_json::json!({
			"title": page.title,
			"action": page.action,
			"nonce_param": NONCE_PARAM,
			"nonce": page.nonce,
			"updated": page.updated,
			"fields": page.fields,
		}),
	)
}


// vim: ts=4
