//! Optional observability helpers for operations flowing through the client.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `graphql_link.operation` with the
//!   `operation` (name), `kind`, and `stage` (call site) fields, plus debug events for cache
//!   lookups.
//! - Enable `metrics` to increment the `graphql_link_operation_total` counter for every
//!   attempt/success/failure/cache hit, labeled by `kind` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to the client.
	Attempt,
	/// Served from the cache without touching the network.
	CacheHit,
	/// Network round trip completed.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::CacheHit => "cache_hit",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
