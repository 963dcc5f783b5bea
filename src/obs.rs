//! Optional observability helpers for both halves of the bridge.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `auth_bridge.cycle` with the `side`
//!   (native/web) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `auth_bridge_cycle_total` counter for every
//!   attempt/success/failure/ignored activation, labeled by `side` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Bridge half that observed a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
	/// Native authorization handler.
	Native,
	/// Web authorization controller.
	Web,
}
impl Side {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Side::Native => "native",
			Side::Web => "web",
		}
	}
}
impl Display for Side {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CycleOutcome {
	/// Entry to a handler or controller.
	Attempt,
	/// Credential obtained (native) or page reloaded (web).
	Success,
	/// Failure reported to the other half or to the user.
	Failure,
	/// Message or activation dropped without a reply.
	Ignored,
}
impl CycleOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CycleOutcome::Attempt => "attempt",
			CycleOutcome::Success => "success",
			CycleOutcome::Failure => "failure",
			CycleOutcome::Ignored => "ignored",
		}
	}
}
impl Display for CycleOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
