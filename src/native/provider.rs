//! Identity provider seam and the presentation context it needs.

// self
use crate::_prelude::*;

/// Boxed future returned by [`IdentityProvider::sign_in`].
pub type SignInFuture<'a> =
	Pin<Box<dyn Future<Output = Result<SignInGrant, SignInFailure>> + 'a + Send>>;

/// Handle to the on-screen surface that hosts the sign-in ceremony.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PresentationContext(String);
impl PresentationContext {
	/// Wraps the host's label for the surface (window label, scene id, ...).
	pub fn new(label: impl Into<String>) -> Self {
		Self(label.into())
	}

	/// Host label of the surface.
	pub fn label(&self) -> &str {
		&self.0
	}
}
impl Debug for PresentationContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "PresentationContext({})", self.0)
	}
}

/// Successful sign-in.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignInGrant {
	/// Credential the server can exchange for a session. Providers may omit it when the client is
	/// not configured for offline access.
	pub server_auth_code: Option<String>,
}
impl SignInGrant {
	/// Grant carrying a server auth code.
	pub fn with_code(code: impl Into<String>) -> Self {
		Self { server_auth_code: Some(code.into()) }
	}
}
impl Debug for SignInGrant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignInGrant")
			.field("server_auth_code_set", &self.server_auth_code.is_some())
			.finish()
	}
}

/// Failed or cancelled sign-in; the description is forwarded to the page verbatim.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{description}")]
pub struct SignInFailure {
	/// Human-readable description supplied by the provider.
	pub description: String,
}
impl SignInFailure {
	/// Wraps a provider description.
	pub fn new(description: impl Into<String>) -> Self {
		Self { description: description.into() }
	}
}

/// OS-level sign-in capability.
///
/// One call runs one ceremony and resolves exactly once.
pub trait IdentityProvider
where
	Self: Send + Sync,
{
	/// Presents the sign-in UI over `context` and resolves with its outcome.
	fn sign_in<'a>(&'a self, context: &'a PresentationContext) -> SignInFuture<'a>;
}

/// Host hooks the handler consults before each ceremony.
pub trait ComponentDelegate
where
	Self: Send + Sync,
{
	/// Surface currently showing the page, if any.
	fn presentation_context(&self) -> Option<PresentationContext>;
}
