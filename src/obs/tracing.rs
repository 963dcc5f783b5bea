// self
use crate::{_prelude::*, obs::Side};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCycle<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCycle<F> = F;

/// A span builder shared by the native handler and the web controller.
#[derive(Clone, Debug)]
pub struct CycleSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CycleSpan {
	/// Creates a new span tagged with the provided bridge side + stage.
	pub fn new(side: Side, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("auth_bridge.cycle", side = side.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (side, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCycle<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CycleSpan::new(Side::Web, "authorize");
		let value = span.instrument(async { "reloaded" }).await;

		assert_eq!(value, "reloaded");
	}
}
