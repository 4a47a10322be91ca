//! Access tokens and the authentication middleware

use axum::{
	extract::{Request, State},
	http::header,
	middleware::Next,
	response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use comment_defaults_types::auth::AuthCtx;

use crate::extract::Auth;
use crate::prelude::*;

/// Access token lifetime in hours
pub const TOKEN_EXPIRE: i64 = 8;

/// Cookie consulted when no Authorization header is present
pub const TOKEN_COOKIE: &str = "token";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessToken<S> {
	pub sub: S,
	pub exp: i64,
	/// Comma separated roles
	pub r: Option<S>,
}

pub fn generate_access_token(secret: &[u8], id_tag: &str, roles: &[&str]) -> ClResult<Box<str>> {
	let roles = roles.join(",");
	let claims = AccessToken::<&str> {
		sub: id_tag,
		exp: Timestamp::now().add_seconds(3600 * TOKEN_EXPIRE).0,
		r: if roles.is_empty() { None } else { Some(roles.as_str()) },
	};

	let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret))
		.map_err(|err| Error::ConfigError(format!("Cannot sign access token: {}", err)))?;
	Ok(token.into())
}

pub fn validate_token(secret: &[u8], token: &str) -> ClResult<AuthCtx> {
	let token_data = decode::<AccessToken<Box<str>>>(
		token,
		&DecodingKey::from_secret(secret),
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|err| {
		debug!("Rejected access token: {}", err);
		Error::Unauthorized
	})?;

	let claims = token_data.claims;
	Ok(AuthCtx {
		id_tag: claims.sub,
		roles: claims
			.r
			.as_deref()
			.unwrap_or_default()
			.split(',')
			.filter(|r| !r.is_empty())
			.map(Box::from)
			.collect(),
	})
}

fn token_from_request(req: &Request) -> Option<&str> {
	if let Some(auth_header) = req.headers().get(header::AUTHORIZATION) {
		return auth_header.to_str().ok()?.strip_prefix("Bearer ");
	}

	req.headers()
		.get_all(header::COOKIE)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(|cookies| cookies.split(';'))
		.find_map(|cookie| {
			let (name, value) = cookie.trim().split_once('=')?;
			(name == TOKEN_COOKIE).then_some(value)
		})
}

/// Rejects requests without a valid access token and stores the actor as
/// an `Auth` extension for the handlers.
pub async fn require_auth(
	State(app): State<App>,
	mut req: Request,
	next: Next,
) -> Result<Response, Error> {
	let token = token_from_request(&req).ok_or(Error::Unauthorized)?;
	let auth_ctx = validate_token(&app.opts.jwt_secret, token)?;

	req.extensions_mut().insert(Auth(auth_ctx));
	Ok(next.run(req).await)
}


// vim: ts=4
