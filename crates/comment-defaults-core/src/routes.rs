//! Router setup

use axum::{
	Router, middleware,
	routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::app::App;
use crate::auth::require_auth;
use crate::perm::require_manage_options;
use crate::{content, settings};

pub fn init(app: App) -> Router {
	let admin_router = Router::new()
		.route(
			&app.opts.admin_path,
			get(settings::handler::get_discussion_page)
				.post(settings::handler::post_discussion_page),
		)
		.route_layer(middleware::from_fn_with_state(app.clone(), require_manage_options));

	let api_router = Router::new()
		.route("/api/records", post(content::post_record))
		.route("/api/records/{record_id}", get(content::get_record))
		.route("/api/attachments", post(content::post_attachment));

	Router::new()
		.merge(admin_router)
		.merge(api_router)
		.route_layer(middleware::from_fn_with_state(app.clone(), require_auth))
		.route("/health", get(async || "ok\n"))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
