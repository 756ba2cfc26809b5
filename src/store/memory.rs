//! Thread-safe in-process [`TtlCache`] for tests and single-process deployments.

// self
use crate::{
	_prelude::*,
	store::{TtlCache, cached::CacheFuture},
};

#[derive(Clone, Debug)]
struct CacheEntry {
	value: String,
	expires_at: OffsetDateTime,
}

type CacheMap = Arc<RwLock<HashMap<String, CacheEntry>>>;

/// In-memory TTL cache guarded by a [`RwLock`]; expired entries are pruned
/// lazily on read.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(CacheMap);
impl MemoryCache {
	fn get_now(map: CacheMap, key: String, now: OffsetDateTime) -> Option<String> {
		{
			let guard = map.read();

			match guard.get(&key) {
				Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
				Some(_) => {},
				None => return None,
			}
		}

		// Entry exists but has expired; drop it under the write lock.
		let mut guard = map.write();

		if guard.get(&key).is_some_and(|entry| entry.expires_at <= now) {
			guard.remove(&key);
		}

		None
	}

	fn set_now(map: CacheMap, key: String, value: String, ttl: Duration, now: OffsetDateTime) {
		map.write().insert(key, CacheEntry { value, expires_at: now + ttl });
	}

	/// Number of live entries at the provided instant.
	pub fn live_entries_at(&self, now: OffsetDateTime) -> usize {
		self.0.read().values().filter(|entry| entry.expires_at > now).count()
	}
}
impl TtlCache for MemoryCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::get_now(map, key, OffsetDateTime::now_utc())) })
	}

	fn set<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> CacheFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();
		let value = value.to_owned();

		Box::pin(async move {
			Self::set_now(map, key, value, ttl, OffsetDateTime::now_utc());

			Ok(())
		})
	}
}
