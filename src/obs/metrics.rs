// self
use crate::obs::{ApiKind, ApiOutcome, AuthOutcome};

/// Records an API operation outcome via the global metrics recorder (when enabled).
pub fn record_api_outcome(kind: ApiKind, outcome: ApiOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"blog_api_client_api_total",
			"op" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records an authentication decision via the global metrics recorder (when enabled).
pub fn record_auth_outcome(outcome: AuthOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("blog_api_client_auth_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
