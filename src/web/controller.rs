//! Authorization controller state machine and result reconciliation.
//!
//! One activation cycle runs
//! `Idle → Sending → AwaitingReply → Reconciling → {Reloading | Failed} → Idle`. The control is
//! disabled synchronously inside [`AuthorizationController::authorize`] before the returned future
//! is first polled, and the in-flight flag rejects a second activation until the native reply (or
//! a transport failure) is observed. Both are released together the moment the reply arrives,
//! before reconciliation starts.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::{
	_prelude::*,
	bridge::{
		AuthorizationOutcome, AuthorizationRequest, AuthorizationResult, ComponentName, Event,
		Message, MessageMetadata, WebBridge,
	},
	error::BridgeError,
	http::{CredentialExchange, ExchangeRequest},
	obs::{self, CycleOutcome, CycleSpan, Side},
	web::{ActivationEvent, Control, ControllerConfig, Page},
};

/// Position of the controller inside one activation cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControllerState {
	/// Control enabled, nothing outstanding.
	#[default]
	Idle,
	/// Activation accepted, request about to be emitted.
	Sending,
	/// Request emitted, waiting for the native reply.
	AwaitingReply,
	/// Reply received, inspecting it.
	Reconciling,
	/// Exchange redirected; page reload requested.
	Reloading,
	/// Cycle failed; the user was alerted.
	Failed,
}

/// Why a cycle ended in [`ControllerState::Failed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
	/// Reply carried no credential.
	Denied,
	/// Callback endpoint answered without redirecting.
	Exchange {
		/// HTTP status of the response.
		status: u16,
	},
	/// Callback request failed before a response arrived.
	Network,
	/// Reply never arrived, timed out, or could not be decoded.
	Bridge,
}

/// Result of one call to [`AuthorizationController::authorize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationOutcome {
	/// Session established; the page was reloaded.
	Reloaded,
	/// Cycle failed and the user was alerted.
	Failed(FailureKind),
	/// Another request was still in flight; nothing happened.
	Ignored,
}

/// Web half of the `google-auth` component.
pub struct AuthorizationController<B, X>
where
	B: ?Sized + WebBridge,
	X: ?Sized + CredentialExchange,
{
	/// Transport used to reach the native handler.
	pub bridge: Arc<B>,
	/// Client that posts the credential to the server.
	pub exchange: Arc<X>,
	/// Element the controller is bound to.
	pub control: Arc<dyn Control>,
	/// Page used for alerts and reloads.
	pub page: Arc<dyn Page>,
	/// Controller tunables.
	pub config: ControllerConfig,
	component: ComponentName,
	state: Mutex<ControllerState>,
	in_flight: AtomicBool,
}
impl<B, X> AuthorizationController<B, X>
where
	B: ?Sized + WebBridge,
	X: ?Sized + CredentialExchange,
{
	/// Creates a controller bound to `control` with the default configuration.
	pub fn new(
		bridge: Arc<B>,
		exchange: Arc<X>,
		control: Arc<dyn Control>,
		page: Arc<dyn Page>,
	) -> Self {
		Self {
			bridge,
			exchange,
			control,
			page,
			config: ControllerConfig::default(),
			component: ComponentName::google_auth(),
			state: Default::default(),
			in_flight: AtomicBool::new(false),
		}
	}

	/// Replaces the configuration.
	pub fn with_config(mut self, config: ControllerConfig) -> Self {
		self.config = config;

		self
	}

	/// Current cycle state.
	pub fn state(&self) -> ControllerState {
		*self.state.lock()
	}

	/// Whether a request is waiting on its reply.
	pub fn is_in_flight(&self) -> bool {
		self.in_flight.load(Ordering::Acquire)
	}

	/// Handles a user activation.
	///
	/// The default action is suppressed and the control disabled before this returns; the returned
	/// future runs the rest of the cycle. Dropping the future early re-enables the control.
	pub fn authorize<'a>(
		&'a self,
		event: &mut dyn ActivationEvent,
	) -> impl Future<Output = ActivationOutcome> + Send + use<'a, B, X> {
		let guard = self.begin(event);

		async move {
			let Some(guard) = guard else {
				obs::record_cycle_outcome(Side::Web, CycleOutcome::Ignored);

				return ActivationOutcome::Ignored;
			};
			let span = CycleSpan::new(Side::Web, "authorize");

			obs::record_cycle_outcome(Side::Web, CycleOutcome::Attempt);

			let outcome = span
				.instrument(async move {
					self.transition(ControllerState::AwaitingReply);

					let reply = self.request_authorization().await;

					drop(guard);
					self.transition(ControllerState::Reconciling);

					match reply {
						Ok(result) => self.reconcile(result).await,
						Err(_e) => {
							#[cfg(feature = "tracing")]
							tracing::warn!(error = %_e, "Authorization reply was not delivered.");

							self.fail(FailureKind::Bridge, None)
						},
					}
				})
				.await;

			self.transition(ControllerState::Idle);

			match outcome {
				ActivationOutcome::Reloaded =>
					obs::record_cycle_outcome(Side::Web, CycleOutcome::Success),
				_ => obs::record_cycle_outcome(Side::Web, CycleOutcome::Failure),
			}

			outcome
		}
	}

	fn begin(&self, event: &mut dyn ActivationEvent) -> Option<InFlight<'_>> {
		event.prevent_default();

		if self
			.in_flight
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			#[cfg(feature = "tracing")]
			tracing::debug!("Ignoring activation while a request is in flight.");

			return None;
		}
		if let Some(toggle) = self.control.toggle() {
			toggle.set_disabled(true);
		}

		self.transition(ControllerState::Sending);

		Some(InFlight { flag: &self.in_flight, control: &*self.control })
	}

	async fn request_authorization(&self) -> Result<AuthorizationResult> {
		let mut message = Message::new(
			self.component.clone(),
			Event::Authorize.as_str(),
			AuthorizationRequest::default().to_data(),
		);

		if let Some(url) = self.page.location() {
			message = message.with_metadata(MessageMetadata { url: Some(url) });
		}

		let id = message.id.clone();
		let send = self.bridge.send(message);
		let reply = match self.config.reply_timeout() {
			Some(limit) => tokio::time::timeout(limit, send).await.map_err(|_| {
				BridgeError::ReplyTimedOut { id: id.into(), timeout_ms: limit.as_millis() }
			})??,
			None => send.await?,
		};

		Ok(AuthorizationResult::from_message(&reply)?)
	}

	async fn reconcile(&self, result: AuthorizationResult) -> ActivationOutcome {
		let code = match result.outcome() {
			AuthorizationOutcome::Granted { code } => code,
			AuthorizationOutcome::Denied { message } =>
				return self.fail(FailureKind::Denied, message),
		};
		let request =
			ExchangeRequest::new(code).with_redirect_uri(self.config.redirect_uri.clone());

		match self.exchange.exchange(request).await {
			Ok(response) if response.redirected => {
				self.transition(ControllerState::Reloading);
				self.page.reload();

				ActivationOutcome::Reloaded
			},
			Ok(response) => self.fail(FailureKind::Exchange { status: response.status }, None),
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(error = %_e, "Credential exchange failed.");

				self.fail(FailureKind::Network, None)
			},
		}
	}

	fn fail(&self, kind: FailureKind, message: Option<String>) -> ActivationOutcome {
		self.transition(ControllerState::Failed);
		self.page.alert(message.as_deref().unwrap_or(&self.config.fallback_message));

		ActivationOutcome::Failed(kind)
	}

	fn transition(&self, next: ControllerState) {
		#[cfg(feature = "tracing")]
		tracing::trace!(state = ?next, "Controller state changed.");

		*self.state.lock() = next;
	}
}
impl<B, X> Debug for AuthorizationController<B, X>
where
	B: ?Sized + WebBridge,
	X: ?Sized + CredentialExchange,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationController")
			.field("component", &self.component)
			.field("config", &self.config)
			.field("state", &self.state())
			.field("in_flight", &self.is_in_flight())
			.finish()
	}
}

/// Holds the in-flight flag; dropping it re-enables the control and clears the flag.
struct InFlight<'a> {
	flag: &'a AtomicBool,
	control: &'a dyn Control,
}
impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		if let Some(toggle) = self.control.toggle() {
			toggle.set_disabled(false);
		}

		self.flag.store(false, Ordering::Release);
	}
}
