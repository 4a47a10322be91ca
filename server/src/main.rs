//! Comment defaults server
//!
//! Configuration comes from the environment:
//! - `LISTEN` (default `127.0.0.1:8080`)
//! - `DB_DIR` (default `./data`)
//! - `SIGNING_KEY`, `JWT_SECRET` (required)
//! - `NONCE_LIFETIME_SECS` (default one day)
//! - `RUST_LOG` for the log filter
//!
//! `comment-defaults token <id_tag> [roles]` prints an access token instead
//! of starting the server.

use std::{env, path::PathBuf, sync::Arc};

use comment_defaults_core::AppBuilder;
use comment_defaults_core::auth::generate_access_token;
use comment_defaults_core::prelude::*;
use comment_defaults_meta_adapter_sqlite::MetaAdapterSqlite;

pub struct Config {
	pub listen: Option<String>,
	pub db_dir: PathBuf,
	pub signing_key: String,
	pub jwt_secret: String,
	pub nonce_lifetime: Option<u64>,
}

fn required(name: &str) -> ClResult<String> {
	env::var(name)
		.ok()
		.filter(|value| !value.is_empty())
		.ok_or_else(|| Error::ConfigError(format!("{} is not set", name)))
}

impl Config {
	fn from_env() -> ClResult<Self> {
		let nonce_lifetime = env::var("NONCE_LIFETIME_SECS")
			.ok()
			.map(|value| {
				value.parse::<u64>().map_err(|_| {
					Error::ConfigError(format!("NONCE_LIFETIME_SECS is not a number: {}", value))
				})
			})
			.transpose()?;

		Ok(Config {
			listen: env::var("LISTEN").ok(),
			db_dir: PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
			signing_key: required("SIGNING_KEY")?,
			jwt_secret: required("JWT_SECRET")?,
			nonce_lifetime,
		})
	}
}

fn print_token(args: &[String]) -> ClResult<()> {
	let Some(id_tag) = args.first() else {
		return Err(Error::ConfigError("usage: comment-defaults token <id_tag> [roles]".into()));
	};
	let roles: Vec<&str> =
		args.get(1).map(|roles| roles.split(',').collect()).unwrap_or_default();

	let token = generate_access_token(required("JWT_SECRET")?.as_bytes(), id_tag, &roles)?;
	println!("{}", token);
	Ok(())
}

#[tokio::main]
async fn main() -> ClResult<()> {
	let args: Vec<String> = env::args().skip(1).collect();
	if args.first().is_some_and(|cmd| cmd == "token") {
		return print_token(&args[1..]);
	}

	let config = Config::from_env()?;
	let meta_adapter = Arc::new(MetaAdapterSqlite::new(&config.db_dir).await?);

	let mut builder = AppBuilder::new();
	builder
		.signing_key(config.signing_key.into_bytes())
		.jwt_secret(config.jwt_secret.into_bytes())
		.meta_adapter(meta_adapter);
	if let Some(listen) = config.listen {
		builder.listen(listen);
	}
	if let Some(seconds) = config.nonce_lifetime {
		builder.nonce_lifetime(seconds);
	}

	builder.run().await
}

// vim: ts=4
