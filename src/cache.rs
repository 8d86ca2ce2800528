//! Response cache contracts and the built-in in-memory implementation.

pub mod key;
pub mod memory;

pub use key::CacheKey;
pub use memory::InMemoryCache;

// self
use crate::response::GraphqlResponse;

/// Process-local store mapping operations to previously fetched responses.
///
/// Implementations carry no eviction or normalization policy of their own; callers decide what
/// to write and when to evict.
pub trait ResponseCache
where
	Self: Send + Sync,
{
	/// Returns the cached response for `key`, if present.
	fn read(&self, key: &CacheKey) -> Option<GraphqlResponse>;

	/// Stores or replaces the response for `key`.
	fn write(&self, key: CacheKey, response: GraphqlResponse);

	/// Removes the entry for `key`, reporting whether one existed.
	fn evict(&self, key: &CacheKey) -> bool;

	/// Drops every entry.
	fn reset(&self);

	/// Number of cached entries.
	fn len(&self) -> usize;

	/// Whether the cache holds no entries.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
