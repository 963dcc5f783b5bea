//! Native/web authorization bridge. Lets a page inside a web view ask the OS identity provider
//! for a credential, carry the single outcome back across the bridge, and finish the session
//! exchange with the server.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod bridge;
pub mod error;
pub mod http;
pub mod native;
pub mod obs;
pub mod web;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and test doubles for both halves of the bridge; enabled via
	//! `cfg(test)` or the `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
	// self
	use crate::{
		bridge::LoopbackBridge,
		error::TransportError,
		http::{CredentialExchange, ExchangeFuture, ExchangeRequest, ExchangeResponse},
		native::{
			AuthorizationHandler, ComponentDelegate, IdentityProvider, PresentationContext,
			SignInFailure, SignInFuture, SignInGrant,
		},
		web::{Control, Page, Toggle},
	};

	/// Identity provider that resolves every ceremony with a fixed outcome.
	#[derive(Debug)]
	pub struct ScriptedProvider {
		outcome: Result<SignInGrant, SignInFailure>,
		calls: AtomicUsize,
	}
	impl ScriptedProvider {
		/// Resolves with `code`.
		pub fn granting(code: &str) -> Self {
			Self { outcome: Ok(SignInGrant::with_code(code)), calls: AtomicUsize::new(0) }
		}

		/// Fails with `description`.
		pub fn failing(description: &str) -> Self {
			Self { outcome: Err(SignInFailure::new(description)), calls: AtomicUsize::new(0) }
		}

		/// Number of ceremonies started.
		pub fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}
	impl IdentityProvider for ScriptedProvider {
		fn sign_in<'a>(&'a self, _context: &'a PresentationContext) -> SignInFuture<'a> {
			self.calls.fetch_add(1, Ordering::SeqCst);

			let outcome = self.outcome.clone();

			Box::pin(async move { outcome })
		}
	}

	/// Delegate whose page is always on screen.
	#[derive(Debug, Default)]
	pub struct OnScreen;
	impl ComponentDelegate for OnScreen {
		fn presentation_context(&self) -> Option<PresentationContext> {
			Some(PresentationContext::new("main"))
		}
	}

	/// Page that records alerts and reloads.
	#[derive(Debug, Default)]
	pub struct RecordingPage {
		location: Option<Url>,
		alerts: Mutex<Vec<String>>,
		reloads: AtomicUsize,
	}
	impl RecordingPage {
		/// Page served from `location`.
		pub fn at(location: Url) -> Self {
			Self { location: Some(location), ..Default::default() }
		}

		/// Alerts shown so far.
		pub fn alerts(&self) -> Vec<String> {
			self.alerts.lock().clone()
		}

		/// Number of reloads requested.
		pub fn reloads(&self) -> usize {
			self.reloads.load(Ordering::SeqCst)
		}
	}
	impl Page for RecordingPage {
		fn alert(&self, message: &str) {
			self.alerts.lock().push(message.to_owned());
		}

		fn reload(&self) {
			self.reloads.fetch_add(1, Ordering::SeqCst);
		}

		fn location(&self) -> Option<Url> {
			self.location.clone()
		}
	}

	/// Control with a disable affordance that remembers every change.
	#[derive(Debug, Default)]
	pub struct ToggleControl {
		disabled: AtomicBool,
		history: Mutex<Vec<bool>>,
	}
	impl ToggleControl {
		/// Every value passed to [`Toggle::set_disabled`], in order.
		pub fn history(&self) -> Vec<bool> {
			self.history.lock().clone()
		}
	}
	impl Control for ToggleControl {
		fn toggle(&self) -> Option<&dyn Toggle> {
			Some(self)
		}
	}
	impl Toggle for ToggleControl {
		fn set_disabled(&self, disabled: bool) {
			self.disabled.store(disabled, Ordering::SeqCst);
			self.history.lock().push(disabled);
		}

		fn is_disabled(&self) -> bool {
			self.disabled.load(Ordering::SeqCst)
		}
	}

	/// Control without a disable affordance.
	#[derive(Debug, Default)]
	pub struct BareControl;
	impl Control for BareControl {}

	/// Exchange client that answers every request with a fixed response and records requests.
	#[derive(Debug)]
	pub struct RecordingExchange {
		response: Option<ExchangeResponse>,
		requests: Mutex<Vec<ExchangeRequest>>,
	}
	impl RecordingExchange {
		/// Answers with a 302 redirect.
		pub fn redirecting() -> Self {
			Self::responding(ExchangeResponse { status: 302, redirected: true })
		}

		/// Answers with `response`.
		pub fn responding(response: ExchangeResponse) -> Self {
			Self { response: Some(response), requests: Default::default() }
		}

		/// Fails every request with a network error.
		pub fn unreachable() -> Self {
			Self { response: None, requests: Default::default() }
		}

		/// Requests received so far.
		pub fn requests(&self) -> Vec<ExchangeRequest> {
			self.requests.lock().clone()
		}
	}
	impl CredentialExchange for RecordingExchange {
		fn exchange(&self, request: ExchangeRequest) -> ExchangeFuture<'_> {
			self.requests.lock().push(request);

			let response = self.response;

			Box::pin(async move {
				response.ok_or_else(|| {
					Error::from(TransportError::network(std::io::Error::new(
						std::io::ErrorKind::ConnectionRefused,
						"exchange endpoint unreachable",
					)))
				})
			})
		}
	}

	/// Loopback bridge with an [`AuthorizationHandler`] for `provider` already registered.
	pub fn loopback_with(provider: Arc<ScriptedProvider>) -> Arc<LoopbackBridge> {
		let bridge = LoopbackBridge::default();
		let handler: AuthorizationHandler<ScriptedProvider, OnScreen> =
			AuthorizationHandler::new(provider, OnScreen);

		bridge
			.register(Arc::new(handler))
			.expect("Fresh loopback bridge should accept the authorization handler.");

		Arc::new(bridge)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
