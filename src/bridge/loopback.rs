//! In-process [`WebBridge`] that routes messages straight to registered components.
//!
//! Useful for tests, demos, and hosts that run both halves in one process. Every send registers a
//! one-shot reply slot keyed by the message id; the first reply carrying that id completes the
//! slot and later replies for the same id are dropped. A send whose id is already pending is
//! rejected before it reaches the component.

// std
use std::collections::hash_map::Entry;
// crates.io
use tokio::sync::oneshot;
// self
use crate::{
	_prelude::*,
	bridge::{BridgeComponent, BridgeFuture, ComponentName, Message, MessageId, WebBridge},
	error::BridgeError,
};

type PendingMap = Mutex<HashMap<MessageId, oneshot::Sender<Message>>>;

/// Loopback transport backed by an in-memory routing table.
#[derive(Default)]
pub struct LoopbackBridge {
	components: RwLock<HashMap<ComponentName, Arc<dyn BridgeComponent>>>,
	pending: PendingMap,
}
impl LoopbackBridge {
	/// Registers a component under its own name.
	pub fn register(&self, component: Arc<dyn BridgeComponent>) -> Result<(), BridgeError> {
		let mut components = self.components.write();
		let name = component.name().clone();

		if components.contains_key(&name) {
			return Err(BridgeError::DuplicateComponent { component: name.into() });
		}

		components.insert(name, component);

		Ok(())
	}

	/// Builder-style variant of [`LoopbackBridge::register`].
	pub fn with_component(self, component: Arc<dyn BridgeComponent>) -> Result<Self, BridgeError> {
		self.register(component)?;

		Ok(self)
	}

	/// Completes the pending slot matching `reply.id`.
	///
	/// Returns `false` when no send is waiting on that id (already completed or never sent).
	pub fn complete(&self, reply: Message) -> bool {
		let Some(slot) = self.pending.lock().remove(&reply.id) else {
			return false;
		};

		slot.send(reply).is_ok()
	}

	/// Number of sends still waiting on a reply.
	pub fn pending_replies(&self) -> usize {
		self.pending.lock().len()
	}

	fn component(&self, name: &ComponentName) -> Result<Arc<dyn BridgeComponent>, BridgeError> {
		self.components
			.read()
			.get(name)
			.cloned()
			.ok_or_else(|| BridgeError::UnknownComponent { component: name.to_string() })
	}
}
impl WebBridge for LoopbackBridge {
	fn send(&self, message: Message) -> BridgeFuture<'_, Message> {
		Box::pin(async move {
			let component = self.component(&message.component)?;
			let id = message.id.clone();
			let (tx, rx) = oneshot::channel();
			let slot = PendingSlot::register(&self.pending, id.clone(), tx)?;

			if let Some(reply) = component.on_receive(message).await {
				let delivered = self.complete(reply);

				#[cfg(feature = "tracing")]
				if !delivered {
					tracing::warn!(message_id = %id, "Dropped a reply without a pending slot.");
				}
				#[cfg(not(feature = "tracing"))]
				let _ = delivered;
			}

			drop(slot);

			rx.await.map_err(|_| BridgeError::ReplyDropped { id: id.into() }.into())
		})
	}
}
impl Debug for LoopbackBridge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoopbackBridge")
			.field("components", &self.components.read().keys().collect::<Vec<_>>())
			.field("pending_replies", &self.pending_replies())
			.finish()
	}
}

/// Removes an unanswered slot when the send completes or is dropped mid-flight.
struct PendingSlot<'a> {
	pending: &'a PendingMap,
	id: MessageId,
}
impl<'a> PendingSlot<'a> {
	fn register(
		pending: &'a PendingMap,
		id: MessageId,
		slot: oneshot::Sender<Message>,
	) -> Result<Self, BridgeError> {
		match pending.lock().entry(id.clone()) {
			Entry::Occupied(_) => return Err(BridgeError::DuplicateMessage { id: id.into() }),
			Entry::Vacant(entry) => {
				entry.insert(slot);
			},
		}

		Ok(Self { pending, id })
	}
}
impl Drop for PendingSlot<'_> {
	fn drop(&mut self) {
		self.pending.lock().remove(&self.id);
	}
}
