// self
use crate::obs::{CycleOutcome, Side};

/// Records a cycle outcome via the global metrics recorder (when enabled).
pub fn record_cycle_outcome(side: Side, outcome: CycleOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"auth_bridge_cycle_total",
			"side" => side.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (side, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_cycle_outcome_noop_without_metrics() {
		record_cycle_outcome(Side::Web, CycleOutcome::Ignored);
	}
}
