//! Authorization handler that answers `authorize` messages with the identity provider's result.

// self
use crate::{
	_prelude::*,
	bridge::{
		AuthorizationResult, BridgeComponent, ComponentFuture, ComponentName, Event, Message,
	},
	native::{ComponentDelegate, IdentityProvider, SignInGrant},
	obs::{self, CycleOutcome, CycleSpan, Side},
};

/// Native half of the `google-auth` component.
///
/// Every `authorize` message produces exactly one reply carrying an [`AuthorizationResult`]; any
/// other event is dropped without a reply.
pub struct AuthorizationHandler<P, D>
where
	P: ?Sized + IdentityProvider,
	D: ?Sized + ComponentDelegate,
{
	name: ComponentName,
	provider: Arc<P>,
	delegate: Arc<D>,
}
impl<P, D> AuthorizationHandler<P, D>
where
	P: ?Sized + IdentityProvider,
	D: ?Sized + ComponentDelegate,
{
	/// Creates a handler registered as `google-auth`.
	pub fn new(provider: impl Into<Arc<P>>, delegate: impl Into<Arc<D>>) -> Self {
		Self {
			name: ComponentName::google_auth(),
			provider: provider.into(),
			delegate: delegate.into(),
		}
	}

	/// Handles one inbound message.
	///
	/// # Panics
	///
	/// Panics when an `authorize` message arrives while the delegate has no presentation context.
	/// Hosts must only route messages to a handler whose page is on screen.
	pub async fn handle(&self, message: Message) -> Option<Message> {
		let Some(event) = Event::parse(&message.event) else {
			#[cfg(feature = "tracing")]
			tracing::debug!(event = %message.event, "Ignoring unrecognized event.");

			obs::record_cycle_outcome(Side::Native, CycleOutcome::Ignored);

			return None;
		};

		match event {
			Event::Authorize => Some(self.authorize(&message).await),
		}
	}

	async fn authorize(&self, message: &Message) -> Message {
		const SIDE: Side = Side::Native;

		let span = CycleSpan::new(SIDE, "authorize");

		obs::record_cycle_outcome(SIDE, CycleOutcome::Attempt);

		let result = span
			.instrument(async {
				let Some(context) = self.delegate.presentation_context() else {
					panic!("`{}` received `authorize` without a presentation context.", self.name);
				};

				match self.provider.sign_in(&context).await {
					Ok(SignInGrant { server_auth_code }) =>
						AuthorizationResult { code: server_auth_code, error: None },
					Err(failure) => {
						#[cfg(feature = "tracing")]
						tracing::debug!(error = %failure, "Identity provider reported a failure.");

						AuthorizationResult::failed(failure.description)
					},
				}
			})
			.await;

		match result.code {
			Some(_) => obs::record_cycle_outcome(SIDE, CycleOutcome::Success),
			None => obs::record_cycle_outcome(SIDE, CycleOutcome::Failure),
		}

		message.replacing(result.to_data())
	}
}
impl<P, D> BridgeComponent for AuthorizationHandler<P, D>
where
	P: ?Sized + IdentityProvider,
	D: ?Sized + ComponentDelegate,
{
	fn name(&self) -> &ComponentName {
		&self.name
	}

	fn on_receive(&self, message: Message) -> ComponentFuture<'_> {
		Box::pin(self.handle(message))
	}
}
impl<P, D> Debug for AuthorizationHandler<P, D>
where
	P: ?Sized + IdentityProvider,
	D: ?Sized + ComponentDelegate,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationHandler").field("name", &self.name).finish()
	}
}
