// self
use crate::obs::GrantOutcome;

/// Records a grant outcome via the global metrics recorder (when enabled).
pub fn record_grant_outcome(outcome: GrantOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("oauth2_relay_grant_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
