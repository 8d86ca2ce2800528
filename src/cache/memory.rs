//! Thread-safe in-memory [`ResponseCache`] implementation.

// self
use crate::{
	_prelude::*,
	cache::{CacheKey, ResponseCache},
	response::GraphqlResponse,
};

type CacheMap = Arc<RwLock<HashMap<CacheKey, GraphqlResponse>>>;

/// Process-local response cache. Clones share the same entries; [`Default`] creates a fresh,
/// empty instance.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCache(CacheMap);
impl InMemoryCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether `other` shares this cache's storage.
	pub fn shares_storage(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}
impl ResponseCache for InMemoryCache {
	fn read(&self, key: &CacheKey) -> Option<GraphqlResponse> {
		self.0.read().get(key).cloned()
	}

	fn write(&self, key: CacheKey, response: GraphqlResponse) {
		self.0.write().insert(key, response);
	}

	fn evict(&self, key: &CacheKey) -> bool {
		self.0.write().remove(key).is_some()
	}

	fn reset(&self) {
		self.0.write().clear();
	}

	fn len(&self) -> usize {
		self.0.read().len()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::operation::Operation;

	fn response(login: &str) -> GraphqlResponse {
		GraphqlResponse {
			data: Some(serde_json::json!({ "viewer": { "login": login } })),
			..Default::default()
		}
	}

	#[test]
	fn write_read_evict_reset() {
		let cache = InMemoryCache::new();
		let viewer = CacheKey::for_operation(&Operation::new("{ viewer { login } }"));
		let rate = CacheKey::for_operation(&Operation::new("{ rateLimit { remaining } }"));

		assert!(cache.is_empty());
		assert!(cache.read(&viewer).is_none());

		cache.write(viewer.clone(), response("octocat"));
		cache.write(viewer.clone(), response("hubot"));
		cache.write(rate.clone(), GraphqlResponse::default());

		assert_eq!(cache.len(), 2);
		assert_eq!(cache.read(&viewer), Some(response("hubot")));
		assert!(cache.evict(&viewer));
		assert!(!cache.evict(&viewer));

		cache.reset();

		assert!(cache.is_empty());
	}

	#[test]
	fn clones_share_and_defaults_do_not() {
		let a = InMemoryCache::default();
		let shared = a.clone();
		let fresh = InMemoryCache::default();
		let key = CacheKey::for_operation(&Operation::new("{ a }"));

		shared.write(key.clone(), GraphqlResponse::default());

		assert!(a.shares_storage(&shared));
		assert!(!a.shares_storage(&fresh));
		assert!(a.read(&key).is_some());
		assert!(fresh.read(&key).is_none());
	}

	#[tokio::test]
	async fn concurrent_writers_are_all_visible() {
		let cache = InMemoryCache::default();
		let tasks = (0..8)
			.map(|i| {
				let cache = cache.clone();

				tokio::spawn(async move {
					let operation = Operation::new("{ a }").with_variable("i", i);
					let key = CacheKey::for_operation(&operation);

					cache.write(key, GraphqlResponse::default());
				})
			})
			.collect::<Vec<_>>();

		for task in tasks {
			task.await.expect("Writer task should not panic.");
		}

		assert_eq!(cache.len(), 8);
	}
}
