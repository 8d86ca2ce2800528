//! Thin runtime that executes operations against a [`ClientConfig`].

// self
use crate::{
	_prelude::*,
	cache::CacheKey,
	config::ClientConfig,
	obs::{self, OperationOutcome, OperationSpan},
	operation::Operation,
	response::GraphqlResponse,
};

/// How a query consults the cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FetchPolicy {
	/// Serve from the cache when possible, otherwise fetch and store.
	#[default]
	CacheFirst,
	/// Always fetch; store the fresh response.
	NetworkOnly,
	/// Serve only from the cache; a miss is an error.
	CacheOnly,
	/// Always fetch; never touch the cache.
	NoCache,
}
impl FetchPolicy {
	fn reads_cache(self) -> bool {
		matches!(self, Self::CacheFirst | Self::CacheOnly)
	}

	fn writes_cache(self) -> bool {
		matches!(self, Self::CacheFirst | Self::NetworkOnly)
	}
}

/// Executes operations through a configured link chain and cache.
#[derive(Clone, Debug)]
pub struct GraphqlClient {
	config: ClientConfig,
}
impl GraphqlClient {
	/// Wraps a configuration.
	pub fn new(config: ClientConfig) -> Self {
		Self { config }
	}

	/// Underlying configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Runs a query under `policy`.
	///
	/// Only responses without GraphQL errors are written to the cache. Mutation documents are
	/// routed through [`mutate`](Self::mutate) regardless of `policy`.
	pub async fn query(
		&self,
		operation: Operation,
		policy: FetchPolicy,
	) -> Result<GraphqlResponse> {
		if operation.is_mutation() {
			return self.mutate(operation).await;
		}

		let kind = operation.kind();
		let span = OperationSpan::new(operation.display_name(), kind, "query");

		obs::record_operation_outcome(kind, OperationOutcome::Attempt);

		span.instrument(async move {
			let key = CacheKey::for_operation(&operation);

			if policy.reads_cache() {
				let cached = self.config.cache.read(&key);

				obs::trace_cache_lookup(operation.display_name(), cached.is_some());

				match cached {
					Some(response) => {
						obs::record_operation_outcome(kind, OperationOutcome::CacheHit);

						return Ok(response);
					},
					None if policy == FetchPolicy::CacheOnly => {
						obs::record_operation_outcome(kind, OperationOutcome::Failure);

						return Err(Error::CacheMiss {
							operation: operation.display_name().to_owned(),
						});
					},
					None => (),
				}
			}

			let response = self.fetch(operation).await?;

			if policy.writes_cache() && !response.has_errors() {
				self.config.cache.write(key, response.clone());
			}

			Ok(response)
		})
		.await
	}

	/// Runs a mutation; the cache is neither read nor written.
	pub async fn mutate(&self, operation: Operation) -> Result<GraphqlResponse> {
		let kind = operation.kind();
		let span = OperationSpan::new(operation.display_name(), kind, "mutate");

		obs::record_operation_outcome(kind, OperationOutcome::Attempt);

		span.instrument(self.fetch(operation)).await
	}

	async fn fetch(&self, operation: Operation) -> Result<GraphqlResponse> {
		let kind = operation.kind();
		let result = self.config.link.execute(operation).await;
		let outcome = match &result {
			Ok(_) => OperationOutcome::Success,
			Err(_) => OperationOutcome::Failure,
		};

		obs::record_operation_outcome(kind, outcome);

		result
	}
}
impl From<ClientConfig> for GraphqlClient {
	fn from(config: ClientConfig) -> Self {
		Self::new(config)
	}
}
