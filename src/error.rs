//! Bridge-level error types shared across the native handler, web controller, and transports.

// self
use crate::_prelude::*;

/// Bridge-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical bridge error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Message routing or reply delivery failed.
	#[error(transparent)]
	Bridge(#[from] BridgeError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) while calling the exchange endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Reply data did not match the authorization result schema.
	#[error(transparent)]
	Payload(#[from] PayloadError),
}

/// Failures raised while routing messages across the native/web boundary.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum BridgeError {
	/// No native component is registered under the addressed name.
	#[error("No component is registered as `{component}`.")]
	UnknownComponent {
		/// Component name carried by the message.
		component: String,
	},
	/// A component with the same name was already registered.
	#[error("Component `{component}` is already registered.")]
	DuplicateComponent {
		/// Conflicting component name.
		component: String,
	},
	/// A send with the same message id is still waiting on its reply.
	#[error("Message `{id}` is already waiting on a reply.")]
	DuplicateMessage {
		/// Identifier shared by both sends.
		id: String,
	},
	/// The reply slot was dropped before a reply arrived.
	#[error("Reply for message `{id}` was dropped before completion.")]
	ReplyDropped {
		/// Identifier of the originating message.
		id: String,
	},
	/// No reply arrived within the configured window.
	#[error("Reply for message `{id}` did not arrive within {timeout_ms} ms.")]
	ReplyTimedOut {
		/// Identifier of the originating message.
		id: String,
		/// Configured timeout in milliseconds.
		timeout_ms: u128,
	},
}

/// Configuration and validation failures raised by the bridge.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Exchange endpoint cannot be resolved against the page origin.
	#[error("Exchange endpoint `{path}` is invalid.")]
	InvalidEndpoint {
		/// Path that failed to resolve.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the exchange endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Reply payload decoding failures.
#[derive(Debug, ThisError)]
pub enum PayloadError {
	/// Message data could not be decoded into the expected shape.
	#[error("Message data is malformed at `{path}`.")]
	Malformed {
		/// JSON path that failed to decode.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for PayloadError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Malformed { path, source: e.into_inner() }
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;

	#[test]
	fn bridge_error_converts_into_crate_error() {
		let err: Error = BridgeError::UnknownComponent { component: "maps".into() }.into();

		assert!(matches!(err, Error::Bridge(BridgeError::UnknownComponent { .. })));
		assert_eq!(err.to_string(), "No component is registered as `maps`.");
	}

	#[test]
	fn payload_error_reports_failing_path() {
		let raw = serde_json::json!({ "code": 42 });
		let err = serde_path_to_error::deserialize::<_, crate::bridge::AuthorizationResult>(raw)
			.map(|_| ())
			.map_err(PayloadError::from)
			.expect_err("Numeric code should fail to decode.");

		assert!(matches!(&err, PayloadError::Malformed { path, .. } if path == "code"));

		let source = StdError::source(&err).expect("Malformed payload should expose its source.");

		assert!(source.to_string().contains("invalid type"));
	}
}
