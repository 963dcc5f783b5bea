//! Credential exchange with the server collaborator.
//!
//! Once the web controller holds a credential it posts it to the server's callback endpoint as a
//! multipart form (`code`, `redirect_uri`). The server signals a completed session exchange by
//! redirecting; every other response is a failure. [`CredentialExchange`] is the controller's only
//! dependency on an HTTP stack, and [`ReqwestExchangeClient`] is the default implementation.

// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Boxed future returned by [`CredentialExchange::exchange`].
pub type ExchangeFuture<'a> = Pin<Box<dyn Future<Output = Result<ExchangeResponse>> + 'a + Send>>;

/// Form posted to the callback endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
	/// Credential returned by the identity provider.
	pub code: String,
	/// Redirect URI forwarded to the server; empty unless configured.
	pub redirect_uri: String,
}
impl ExchangeRequest {
	/// Creates a request for `code` with an empty redirect URI.
	pub fn new(code: impl Into<String>) -> Self {
		Self { code: code.into(), redirect_uri: String::new() }
	}

	/// Overrides the redirect URI.
	pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = redirect_uri.into();

		self
	}

	/// Multipart field names and values in posting order.
	pub fn form_fields(&self) -> [(&'static str, &str); 2] {
		[("code", self.code.as_str()), ("redirect_uri", self.redirect_uri.as_str())]
	}
}
impl Debug for ExchangeRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ExchangeRequest")
			.field("code", &"<redacted>")
			.field("redirect_uri", &self.redirect_uri)
			.finish()
	}
}

/// What the controller needs to know about the callback response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExchangeResponse {
	/// HTTP status of the response.
	pub status: u16,
	/// Whether the server answered with (or the client followed) a redirect.
	pub redirected: bool,
}

/// Posts credentials to the server collaborator.
pub trait CredentialExchange
where
	Self: 'static + Send + Sync,
{
	/// Submits `request` and reports the response shape. Network failures resolve to `Err`.
	fn exchange(&self, request: ExchangeRequest) -> ExchangeFuture<'_>;
}

/// Reqwest-backed [`CredentialExchange`].
///
/// The client built by [`ReqwestExchangeClient::new`] does not follow redirects, so a 3xx from the
/// callback endpoint is reported as-is. A caller-supplied client that does follow redirects is
/// also supported: the response counts as redirected when its final URL differs from the endpoint.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestExchangeClient {
	client: ReqwestClient,
	endpoint: Url,
}
#[cfg(feature = "reqwest")]
impl ReqwestExchangeClient {
	/// Builds a client that posts to `endpoint` without following redirects.
	pub fn new(endpoint: Url) -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self { client, endpoint })
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient, endpoint: Url) -> Self {
		Self { client, endpoint }
	}

	/// Callback endpoint the client posts to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}
}
#[cfg(feature = "reqwest")]
impl CredentialExchange for ReqwestExchangeClient {
	fn exchange(&self, request: ExchangeRequest) -> ExchangeFuture<'_> {
		Box::pin(async move {
			let form = request
				.form_fields()
				.into_iter()
				.fold(reqwest::multipart::Form::new(), |form, (name, value)| {
					form.text(name, value.to_owned())
				});
			let response = self
				.client
				.post(self.endpoint.clone())
				.multipart(form)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status();
			let redirected = status.is_redirection() || response.url() != &self.endpoint;

			#[cfg(feature = "tracing")]
			tracing::debug!(status = status.as_u16(), redirected, "Credential exchange responded.");

			Ok(ExchangeResponse { status: status.as_u16(), redirected })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn form_fields_keep_empty_redirect_uri() {
		let request = ExchangeRequest::new("XYZ");

		assert_eq!(request.form_fields(), [("code", "XYZ"), ("redirect_uri", "")]);

		let request = request.with_redirect_uri("https://app.example.com/home");

		assert_eq!(request.form_fields()[1], ("redirect_uri", "https://app.example.com/home"));
	}

	#[test]
	fn debug_redacts_the_credential() {
		let rendered = format!("{:?}", ExchangeRequest::new("secret-code"));

		assert!(!rendered.contains("secret-code"));
		assert!(rendered.contains("<redacted>"));
	}
}
