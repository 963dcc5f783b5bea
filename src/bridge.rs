//! Message contract shared by the native handler and the web controller.
//!
//! Both halves address each other through a [`ComponentName`]; the authorization feature uses
//! [`GOOGLE_AUTH_COMPONENT`] and a single recognized [`Event`], `authorize`.

pub mod id;
pub mod loopback;
pub mod message;
pub mod payload;
pub mod transport;

pub use id::*;
pub use loopback::*;
pub use message::*;
pub use payload::*;
pub use transport::*;

// self
use crate::_prelude::*;

/// Component name shared by the native handler and the web controller.
pub const GOOGLE_AUTH_COMPONENT: &str = "google-auth";

/// Events understood by the authorization component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
	/// Start the native sign-in ceremony.
	Authorize,
}
impl Event {
	/// Returns the wire name of the event.
	pub const fn as_str(self) -> &'static str {
		match self {
			Event::Authorize => "authorize",
		}
	}

	/// Parses a wire name; unknown names yield `None`.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"authorize" => Some(Event::Authorize),
			_ => None,
		}
	}
}
impl Display for Event {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn event_names_round_trip() {
		assert_eq!(Event::parse(Event::Authorize.as_str()), Some(Event::Authorize));
		assert_eq!(Event::parse("unknown"), None);
		assert_eq!(Event::parse("Authorize"), None);
	}

	#[test]
	fn component_name_matches_constant() {
		assert_eq!(&*ComponentName::google_auth(), GOOGLE_AUTH_COMPONENT);
	}
}
