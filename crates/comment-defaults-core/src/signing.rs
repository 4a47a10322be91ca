//! Signed admin action links
//!
//! A signature binds an action name and the acting user to a time bucket of
//! half the configured lifetime. Verification accepts the current and the
//! previous bucket, so a link stays valid for at least half and at most the
//! full lifetime. Signatures are not single-use: the same link may be
//! followed again until it expires.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::prelude::*;

type HmacSha256 = Hmac<Sha256>;

/// Query parameter carrying the signature
pub const NONCE_PARAM: &str = "_nonce";

/// Default signature lifetime: one day
pub const DEFAULT_NONCE_LIFETIME: u64 = 86400;

pub struct ActionSigner {
	key: Box<[u8]>,
	lifetime: u64,
}

impl std::fmt::Debug for ActionSigner {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActionSigner").field("lifetime", &self.lifetime).finish_non_exhaustive()
	}
}

impl ActionSigner {
	pub fn new(key: impl Into<Box<[u8]>>, lifetime: u64) -> ClResult<Self> {
		let key = key.into();
		if key.is_empty() {
			return Err(Error::ConfigError("Signing key must not be empty".into()));
		}
		if lifetime < 2 {
			return Err(Error::ConfigError("Signature lifetime must be at least 2 seconds".into()));
		}
		Ok(Self { key, lifetime })
	}

	fn tick(&self, now: Timestamp) -> i64 {
		let half = i64::try_from(self.lifetime / 2).unwrap_or(i64::MAX);
		now.0.div_euclid(half)
	}

	fn mac(&self, tick: i64, action: &str, actor: &str) -> ClResult<HmacSha256> {
		let mut mac = HmacSha256::new_from_slice(&self.key)
			.map_err(|_| Error::ConfigError("Invalid signing key".into()))?;
		mac.update(tick.to_string().as_bytes());
		mac.update(b"|");
		mac.update(action.as_bytes());
		mac.update(b"|");
		mac.update(actor.as_bytes());
		Ok(mac)
	}

	pub fn create(&self, action: &str, actor: &str) -> ClResult<Box<str>> {
		self.create_at(action, actor, Timestamp::now())
	}

	pub fn create_at(&self, action: &str, actor: &str, now: Timestamp) -> ClResult<Box<str>> {
		let mac = self.mac(self.tick(now), action, actor)?;
		let signature =
			base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
		Ok(signature.into())
	}

	pub fn verify(&self, action: &str, actor: &str, token: &str) -> bool {
		self.verify_at(action, actor, token, Timestamp::now())
	}

	pub fn verify_at(&self, action: &str, actor: &str, token: &str, now: Timestamp) -> bool {
		let Ok(signature) = base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(token) else {
			return false;
		};
		let tick = self.tick(now);

		[tick, tick - 1].into_iter().any(|tick| {
			self.mac(tick, action, actor).is_ok_and(|mac| mac.verify_slice(&signature).is_ok())
		})
	}

	/// Appends a signature for `action` to `url`
	pub fn sign_url(&self, action: &str, actor: &str, url: &str) -> ClResult<String> {
		let token = self.create(action, actor)?;
		let separator = if url.contains('?') { '&' } else { '?' };
		Ok(format!("{}{}{}={}", url, separator, NONCE_PARAM, token))
	}
}


// vim: ts=4
