//! Wire envelope exchanged between the web controller and native components.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	bridge::{ComponentName, MessageId},
	error::PayloadError,
};

/// Page metadata attached by the web side when it emits a message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
	/// URL of the page that sent the message.
	pub url: Option<Url>,
}

/// Single message travelling across the bridge in either direction.
///
/// Replies reuse the request's `id`, `component`, and `event`; only `data`
/// changes. See [`Message::replacing`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
	/// Correlation identifier shared by a request and its reply.
	pub id: MessageId,
	/// Component the message is routed to.
	pub component: ComponentName,
	/// Event name, e.g. `authorize`.
	pub event: String,
	/// Optional page metadata.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<MessageMetadata>,
	/// Event-specific payload.
	#[serde(default)]
	pub data: Value,
}
impl Message {
	/// Creates an outbound message with a freshly generated identifier.
	pub fn new(component: ComponentName, event: impl Into<String>, data: Value) -> Self {
		Self { id: MessageId::generate(), component, event: event.into(), metadata: None, data }
	}

	/// Attaches page metadata.
	pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
		self.metadata = Some(metadata);

		self
	}

	/// Builds the reply for this message by swapping in new data.
	pub fn replacing(&self, data: Value) -> Self {
		Self { data, ..self.clone() }
	}

	/// Decodes `data` into `T`, reporting the failing JSON path on mismatch.
	pub fn decode<T>(&self) -> Result<T, PayloadError>
	where
		T: for<'de> Deserialize<'de>,
	{
		Ok(serde_path_to_error::deserialize(&self.data)?)
	}
}
