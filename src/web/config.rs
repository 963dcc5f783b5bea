//! Controller tunables and the exchange endpoint they resolve to.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, error::ConfigError};

/// Message shown when no provider description is available.
pub const FALLBACK_MESSAGE: &str = "Could not authenticate using Google, please try another way.";
/// Default server path the credential is posted to.
pub const CALLBACK_PATH: &str = "/auth/google/callback";

/// Tunables for [`AuthorizationController`](crate::web::AuthorizationController).
///
/// Deserializes from partial documents; missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
	/// Path of the credential exchange endpoint, resolved against the page origin.
	///
	/// The controller never reads this field. Hosts pass the URL from
	/// [`ControllerConfig::exchange_endpoint`] to the exchange client they build.
	pub callback_path: String,
	/// `redirect_uri` form field forwarded with the credential.
	pub redirect_uri: String,
	/// Alert text used when no better description is available.
	pub fallback_message: String,
	/// Upper bound on the wait for the native reply, in milliseconds. `None` waits forever.
	pub reply_timeout_ms: Option<u64>,
}
impl ControllerConfig {
	/// Overrides the exchange endpoint path.
	pub fn with_callback_path(mut self, path: impl Into<String>) -> Self {
		self.callback_path = path.into();

		self
	}

	/// Overrides the forwarded `redirect_uri`.
	pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = redirect_uri.into();

		self
	}

	/// Overrides the fallback alert text.
	pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
		self.fallback_message = message.into();

		self
	}

	/// Bounds the wait for the native reply.
	pub fn with_reply_timeout(mut self, timeout: StdDuration) -> Self {
		self.reply_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));

		self
	}

	/// Reply timeout as a [`std::time::Duration`].
	pub fn reply_timeout(&self) -> Option<StdDuration> {
		self.reply_timeout_ms.map(StdDuration::from_millis)
	}

	/// Resolves [`ControllerConfig::callback_path`] against the page origin.
	pub fn exchange_endpoint(&self, origin: &Url) -> Result<Url, ConfigError> {
		origin.join(&self.callback_path).map_err(|source| ConfigError::InvalidEndpoint {
			path: self.callback_path.clone(),
			source,
		})
	}
}
impl Default for ControllerConfig {
	fn default() -> Self {
		Self {
			callback_path: CALLBACK_PATH.into(),
			redirect_uri: String::new(),
			fallback_message: FALLBACK_MESSAGE.into(),
			reply_timeout_ms: None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn partial_documents_keep_defaults() {
		let config: ControllerConfig =
			serde_json::from_value(serde_json::json!({
				"redirect_uri": "https://app.example.com/home",
				"reply_timeout_ms": 1500
			}))
			.expect("Partial config should deserialize.");

		assert_eq!(config.callback_path, CALLBACK_PATH);
		assert_eq!(config.fallback_message, FALLBACK_MESSAGE);
		assert_eq!(config.redirect_uri, "https://app.example.com/home");
		assert_eq!(config.reply_timeout(), Some(StdDuration::from_millis(1500)));
	}

	#[test]
	fn exchange_endpoint_resolves_against_origin() {
		let origin = Url::parse("https://app.example.com/users/sign_in")
			.expect("Origin fixture should parse.");
		let endpoint = ControllerConfig::default()
			.exchange_endpoint(&origin)
			.expect("Default callback path should resolve.");

		assert_eq!(endpoint.as_str(), "https://app.example.com/auth/google/callback");
	}

	#[test]
	fn exchange_endpoint_rejects_opaque_origins() {
		let origin = Url::parse("data:text/plain,hello").expect("Data URL should parse.");
		let err = ControllerConfig::default()
			.exchange_endpoint(&origin)
			.expect_err("Opaque origins cannot anchor a relative path.");

		assert!(matches!(
			err,
			ConfigError::InvalidEndpoint { ref path, .. } if path == CALLBACK_PATH
		));
	}

	#[test]
	fn builders_override_fields() {
		let config = ControllerConfig::default()
			.with_callback_path("/sessions/google")
			.with_redirect_uri("https://app.example.com/")
			.with_fallback_message("Try again.")
			.with_reply_timeout(StdDuration::from_secs(2));

		assert_eq!(config.callback_path, "/sessions/google");
		assert_eq!(config.redirect_uri, "https://app.example.com/");
		assert_eq!(config.fallback_message, "Try again.");
		assert_eq!(config.reply_timeout_ms, Some(2_000));
	}
}
