//! Payloads for the `authorize` round trip.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, bridge::Message, error::PayloadError};

/// Data sent with the `authorize` event. Always the empty object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {}
impl AuthorizationRequest {
	/// Encodes the request as message data (`{}`).
	pub fn to_data(self) -> Value {
		// Unit-like structs always serialize.
		serde_json::to_value(self).unwrap_or_default()
	}
}

/// Reply data produced by the native handler once the identity provider resolves.
///
/// The wire form tolerates both fields being absent or both being set. Consumers should branch on
/// [`AuthorizationResult::outcome`] instead of inspecting the fields directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationResult {
	/// Server-exchangeable authorization credential.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	/// Human-readable failure description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
impl AuthorizationResult {
	/// Result carrying a credential.
	pub fn granted(code: impl Into<String>) -> Self {
		Self { code: Some(code.into()), error: None }
	}

	/// Result carrying a failure description.
	pub fn failed(error: impl Into<String>) -> Self {
		Self { code: None, error: Some(error.into()) }
	}

	/// Encodes the result as message data, omitting absent fields.
	pub fn to_data(&self) -> Value {
		// String fields always serialize.
		serde_json::to_value(self).unwrap_or_default()
	}

	/// Decodes the result from a reply message.
	pub fn from_message(message: &Message) -> Result<Self, PayloadError> {
		message.decode()
	}

	/// Classifies the result. A missing or empty `code` is a denial regardless of `error`.
	pub fn outcome(&self) -> AuthorizationOutcome {
		self.clone().into()
	}
}

/// Consumer-side view of an [`AuthorizationResult`]: credential XOR failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizationOutcome {
	/// Identity provider returned a credential.
	Granted {
		/// Credential to exchange with the server.
		code: String,
	},
	/// No credential was returned.
	Denied {
		/// Forwarded failure description, if any.
		message: Option<String>,
	},
}
impl From<AuthorizationResult> for AuthorizationOutcome {
	fn from(result: AuthorizationResult) -> Self {
		match result.code.filter(|code| !code.is_empty()) {
			Some(code) => Self::Granted { code },
			None => Self::Denied { message: result.error },
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn request_encodes_as_empty_object() {
		assert_eq!(AuthorizationRequest::default().to_data(), json!({}));
	}

	#[test]
	fn absent_fields_are_omitted_on_the_wire() {
		assert_eq!(AuthorizationResult::granted("abc123").to_data(), json!({ "code": "abc123" }));
		assert_eq!(
			AuthorizationResult::failed("cancelled").to_data(),
			json!({ "error": "cancelled" })
		);
		assert_eq!(AuthorizationResult::default().to_data(), json!({}));
	}

	#[test]
	fn null_fields_decode_as_absent() {
		let result: AuthorizationResult =
			serde_json::from_value(json!({ "code": null, "error": "cancelled" }))
				.expect("Null code should decode.");

		assert_eq!(result, AuthorizationResult::failed("cancelled"));
	}

	#[test]
	fn outcome_prefers_code_when_both_are_set() {
		let result = AuthorizationResult {
			code: Some("abc123".into()),
			error: Some("ignored".into()),
		};

		assert_eq!(result.outcome(), AuthorizationOutcome::Granted { code: "abc123".into() });
	}

	#[test]
	fn outcome_treats_missing_or_empty_code_as_denial() {
		assert_eq!(
			AuthorizationResult::default().outcome(),
			AuthorizationOutcome::Denied { message: None }
		);

		let empty = AuthorizationResult { code: Some(String::new()), error: None };

		assert_eq!(empty.outcome(), AuthorizationOutcome::Denied { message: None });
		assert_eq!(
			AuthorizationResult::failed("User cancelled").outcome(),
			AuthorizationOutcome::Denied { message: Some("User cancelled".into()) }
		);
	}
}
