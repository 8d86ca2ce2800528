// self
use crate::{obs::OperationOutcome, operation::OperationKind};

/// Bumps `graphql_link_operation_total`, labelled by GraphQL operation kind and how the client
/// resolved it (cache hit, network success, or failure). Compiles to nothing without `metrics`.
pub fn record_operation_outcome(kind: OperationKind, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"graphql_link_operation_total",
			"kind" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn every_operation_kind_and_outcome_can_be_recorded() {
		let kinds = [OperationKind::Query, OperationKind::Mutation, OperationKind::Subscription];

		for kind in kinds {
			for outcome in [
				OperationOutcome::Attempt,
				OperationOutcome::CacheHit,
				OperationOutcome::Success,
				OperationOutcome::Failure,
			] {
				record_operation_outcome(kind, outcome);
			}
		}
	}
}
