//! App state and builder

use std::sync::Arc;

use comment_defaults_types::meta_adapter::MetaAdapter;

use crate::prelude::*;
use crate::routes;
use crate::settings::render::Templates;
use crate::settings::{self, FrozenSettingsRegistry, SettingsRegistry, SettingsStore};
use crate::signing::{ActionSigner, DEFAULT_NONCE_LIFETIME};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub meta_adapter: Arc<dyn MetaAdapter>,

	// Settings subsystem
	pub settings: SettingsStore,
	pub settings_registry: Arc<FrozenSettingsRegistry>,
	pub templates: Templates,

	pub signer: ActionSigner,
}

pub type App = Arc<AppState>;

pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Path of the discussion settings page
	pub admin_path: Box<str>,
	pub signing_key: Box<[u8]>,
	pub jwt_secret: Box<[u8]>,
	/// Validity of signed admin links, in seconds
	pub nonce_lifetime: u64,
}

impl std::fmt::Debug for AppBuilderOpts {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppBuilderOpts")
			.field("listen", &self.listen)
			.field("admin_path", &self.admin_path)
			.field("nonce_lifetime", &self.nonce_lifetime)
			.finish_non_exhaustive()
	}
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	meta_adapter: Option<Arc<dyn MetaAdapter>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				admin_path: "/admin/discussion".into(),
				signing_key: Box::new([]),
				jwt_secret: Box::new([]),
				nonce_lifetime: DEFAULT_NONCE_LIFETIME,
			},
			meta_adapter: None,
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn admin_path(&mut self, admin_path: impl Into<Box<str>>) -> &mut Self {
		self.opts.admin_path = admin_path.into();
		self
	}
	pub fn signing_key(&mut self, signing_key: impl Into<Box<[u8]>>) -> &mut Self {
		self.opts.signing_key = signing_key.into();
		self
	}
	pub fn jwt_secret(&mut self, jwt_secret: impl Into<Box<[u8]>>) -> &mut Self {
		self.opts.jwt_secret = jwt_secret.into();
		self
	}
	pub fn nonce_lifetime(&mut self, seconds: u64) -> &mut Self {
		self.opts.nonce_lifetime = seconds;
		self
	}

	// Adapters
	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self {
		self.meta_adapter = Some(meta_adapter);
		self
	}

	/// Validates the configuration and assembles the app state
	pub fn build(self) -> ClResult<App> {
		let Some(meta_adapter) = self.meta_adapter else {
			error!("FATAL: No meta adapter configured");
			return Err(Error::ConfigError("No meta adapter configured".into()));
		};
		if self.opts.jwt_secret.is_empty() {
			error!("FATAL: No JWT secret configured");
			return Err(Error::ConfigError("No JWT secret configured".into()));
		}
		if !self.opts.admin_path.starts_with('/') {
			return Err(Error::ConfigError(format!(
				"Admin path must start with '/': {}",
				self.opts.admin_path
			)));
		}
		let signer = ActionSigner::new(self.opts.signing_key.clone(), self.opts.nonce_lifetime)?;

		let mut settings_registry = SettingsRegistry::new();
		settings::register_settings(&mut settings_registry)?;
		info!("Registered {} settings", settings_registry.len());
		let templates = Templates::new()?;

		Ok(Arc::new(AppState {
			settings: SettingsStore::new(meta_adapter.clone()),
			settings_registry: Arc::new(settings_registry.freeze()),
			templates,
			meta_adapter,
			signer,
			opts: self.opts,
		}))
	}

	pub async fn run(self) -> ClResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("Comment defaults V{}", VERSION);

		let app = self.build()?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on HTTP {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
