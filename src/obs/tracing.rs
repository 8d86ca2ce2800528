// self
use crate::{_prelude::*, operation::OperationKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used around client operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the operation name, kind, and stage.
	pub fn new(name: &str, kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"graphql_link.operation",
				operation = name,
				kind = kind.as_str(),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (name, kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
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

/// Emits a debug event describing a cache lookup.
pub fn trace_cache_lookup(name: &str, hit: bool) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(operation = name, hit, "graphql_link.cache_lookup");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (name, hit);
	}
}

/// Emits a debug event describing an HTTP exchange.
pub fn trace_http_exchange(endpoint: &Url, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(endpoint = %endpoint, status, "graphql_link.http_exchange");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (endpoint, status);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::new("Viewer", OperationKind::Query, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn trace_helpers_noop_without_subscriber() {
		trace_cache_lookup("Viewer", true);
		trace_http_exchange(
			&Url::parse("https://api.github.com/graphql").expect("Fixture URL should parse."),
			200,
		);
	}
}
