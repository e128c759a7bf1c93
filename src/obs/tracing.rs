// self
use crate::{
	_prelude::*,
	obs::{ApiKind, AuthNotice, Diagnostics},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedApi<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedApi<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct ApiSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ApiSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(kind: ApiKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("blog_api_client.api", op = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedApi<Fut>
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

/// Default diagnostics sink that forwards notices to `tracing` events.
///
/// Without the `tracing` feature the sink silently drops notices, keeping the
/// default build dependency-free while preserving the injected-sink seam.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;
impl Diagnostics for TracingDiagnostics {
	fn warn(&self, notice: AuthNotice) {
		#[cfg(feature = "tracing")]
		{
			tracing::warn!(target: "blog_api_client.auth", "{notice}");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = notice;
		}
	}

	fn error(&self, notice: AuthNotice) {
		#[cfg(feature = "tracing")]
		{
			tracing::error!(target: "blog_api_client.auth", "{notice}");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = notice;
		}
	}
}
