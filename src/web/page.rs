//! Page-side seams the controller drives: the triggering control, the activation event, and the
//! page itself.

// self
use crate::_prelude::*;

/// Element the controller is bound to.
pub trait Control
where
	Self: Send + Sync,
{
	/// Enable/disable affordance, if the element has one. Elements without it are left untouched.
	fn toggle(&self) -> Option<&dyn Toggle> {
		None
	}
}

/// Enable/disable affordance of a [`Control`].
pub trait Toggle
where
	Self: Send + Sync,
{
	/// Sets the disabled flag.
	fn set_disabled(&self, disabled: bool);

	/// Current disabled flag.
	fn is_disabled(&self) -> bool;
}

/// User activation that triggered the controller (click, key press, ...).
pub trait ActivationEvent {
	/// Suppresses the element's default action, e.g. following a link.
	fn prevent_default(&mut self);
}

/// Page hosting the controller.
pub trait Page
where
	Self: Send + Sync,
{
	/// Shows a blocking alert.
	fn alert(&self, message: &str);

	/// Reloads the whole page.
	fn reload(&self);

	/// Current page URL, attached to outbound messages as metadata.
	fn location(&self) -> Option<Url> {
		None
	}
}

/// Plain [`ActivationEvent`] for hosts that do not carry a DOM event around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Activation {
	default_prevented: bool,
}
impl Activation {
	/// Whether [`ActivationEvent::prevent_default`] was called.
	pub fn default_prevented(&self) -> bool {
		self.default_prevented
	}
}
impl ActivationEvent for Activation {
	fn prevent_default(&mut self) {
		self.default_prevented = true;
	}
}
