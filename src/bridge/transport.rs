//! Transport seams between the two halves of the bridge.
//!
//! The crate does not define how messages are serialized across the native/web boundary. Hosts
//! implement [`WebBridge`] on top of their web view and route inbound messages to any
//! [`BridgeComponent`] registered under the message's component name.

// self
use crate::{
	_prelude::*,
	bridge::{ComponentName, Message},
};

/// Boxed future returned by [`WebBridge::send`].
pub type BridgeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Boxed future returned by [`BridgeComponent::on_receive`].
pub type ComponentFuture<'a> = Pin<Box<dyn Future<Output = Option<Message>> + 'a + Send>>;

/// Web-side view of the transport.
pub trait WebBridge
where
	Self: Send + Sync,
{
	/// Sends `message` to its component and resolves with the single reply.
	///
	/// Implementations deliver at most one reply per send and never hand a reply to a send it
	/// does not correlate with.
	fn send(&self, message: Message) -> BridgeFuture<'_, Message>;
}

/// Native handler registered under a component name.
pub trait BridgeComponent
where
	Self: Send + Sync,
{
	/// Name the transport routes on.
	fn name(&self) -> &ComponentName;

	/// Handles one inbound message.
	///
	/// Resolves to `Some(reply)` exactly once for every recognized event and to `None` for
	/// events the component ignores.
	fn on_receive(&self, message: Message) -> ComponentFuture<'_>;
}
