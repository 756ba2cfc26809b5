//! Cache-backed store behavior: key derivation, TTL handling, delegation.

// std
use std::sync::{Arc, Mutex};
// crates.io
use http::Request;
// self
use oauth2_relay::{
	auth::ClientIdentity,
	request::RelayRequest,
	store::{
		AuthorizationStore, CachedStore, HashAlgorithm, MemoryCache, TtlCache,
		cached::CacheFuture,
	},
	time::{Duration, OffsetDateTime},
};

fn identity(issuer: &str, client_id: &str) -> ClientIdentity {
	ClientIdentity::new(issuer, client_id).expect("Identity fixture should be valid.")
}

fn request() -> RelayRequest {
	RelayRequest::new(
		Request::builder()
			.uri("https://api.example.com/resource")
			.body(Vec::new())
			.expect("Request fixture should build."),
	)
}

/// Cache that records the keys and TTLs it is handed.
#[derive(Default)]
struct RecordingCache {
	sets: Mutex<Vec<(String, String, Duration)>>,
	gets: Mutex<Vec<String>>,
}
impl TtlCache for RecordingCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>> {
		Box::pin(async move {
			self.gets.lock().unwrap().push(key.to_owned());

			Ok(None)
		})
	}

	fn set<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> CacheFuture<'a, ()> {
		Box::pin(async move {
			self.sets.lock().unwrap().push((key.to_owned(), value.to_owned(), ttl));

			Ok(())
		})
	}
}

#[tokio::test]
async fn get_and_put_agree_on_the_derived_key() {
	let cache = Arc::new(RecordingCache::default());
	let store: CachedStore<RecordingCache> = CachedStore::new(cache.clone());
	let client = identity("https://issuer.example.com", "relay-client");
	let request = request().with_grant_param("scope", "api.read");

	store.get(&client, &request).await.expect("Cached get should succeed.");
	store
		.put(&client, &request, "Bearer abc", None)
		.await
		.expect("Cached put should succeed.");

	let gets = cache.gets.lock().unwrap();
	let sets = cache.sets.lock().unwrap();

	assert_eq!(gets.len(), 1);
	assert_eq!(sets.len(), 1);
	assert_eq!(gets[0], sets[0].0);
	// Default algorithm is SHA-1: 40 hex characters.
	assert_eq!(gets[0].len(), 40);
}

#[tokio::test]
async fn put_uses_the_caller_ttl_else_the_configured_default() {
	let cache = Arc::new(RecordingCache::default());
	let store: CachedStore<RecordingCache> =
		CachedStore::new(cache.clone()).with_default_ttl(Duration::seconds(900));
	let client = identity("https://issuer.example.com", "relay-client");
	let request = request();

	store
		.put(&client, &request, "Bearer explicit", Some(Duration::seconds(60)))
		.await
		.expect("Cached put should succeed.");
	store
		.put(&client, &request, "Bearer default", None)
		.await
		.expect("Cached put should succeed.");

	let sets = cache.sets.lock().unwrap();

	assert_eq!(sets[0].2, Duration::seconds(60));
	assert_eq!(sets[1].2, Duration::seconds(900));
}

#[tokio::test]
async fn distinct_grant_params_partition_the_cache() {
	let store = CachedStore::new(MemoryCache::default());
	let client = identity("https://issuer.example.com", "relay-client");
	let read = request().with_grant_param("scope", "api.read");
	let write = request().with_grant_param("scope", "api.write");

	store
		.put(&client, &read, "Bearer read-token", None)
		.await
		.expect("Cached put should succeed.");

	assert_eq!(
		store.get(&client, &read).await.expect("Cached get should succeed."),
		Some("Bearer read-token".into()),
	);
	assert_eq!(store.get(&client, &write).await.expect("Cached get should succeed."), None);
}

#[tokio::test]
async fn distinct_clients_partition_the_cache() {
	let store = CachedStore::new(MemoryCache::default());
	let first = identity("https://issuer.example.com", "relay-client");
	let other_client = identity("https://issuer.example.com", "other-client");
	let other_issuer = identity("https://other.example.com", "relay-client");
	let request = request();

	store
		.put(&first, &request, "Bearer first", None)
		.await
		.expect("Cached put should succeed.");

	assert_eq!(
		store.get(&first, &request).await.expect("Cached get should succeed."),
		Some("Bearer first".into()),
	);
	assert_eq!(
		store.get(&other_client, &request).await.expect("Cached get should succeed."),
		None,
	);
	assert_eq!(
		store.get(&other_issuer, &request).await.expect("Cached get should succeed."),
		None,
	);
}

#[tokio::test]
async fn sha256_keys_are_sixty_four_hex_characters() {
	let cache = Arc::new(RecordingCache::default());
	let store: CachedStore<RecordingCache> =
		CachedStore::new(cache.clone()).with_hash_algorithm(HashAlgorithm::Sha256);
	let client = identity("https://issuer.example.com", "relay-client");

	store.get(&client, &request()).await.expect("Cached get should succeed.");

	assert_eq!(cache.gets.lock().unwrap()[0].len(), 64);
}

#[tokio::test]
async fn memory_cache_entries_are_visible_until_expiry() {
	let cache = MemoryCache::default();
	let store = CachedStore::new(cache.clone());
	let client = identity("https://issuer.example.com", "relay-client");
	let request = request();

	store
		.put(&client, &request, "Bearer live", Some(Duration::hours(1)))
		.await
		.expect("Cached put should succeed.");

	assert_eq!(cache.live_entries_at(OffsetDateTime::now_utc()), 1);
	assert_eq!(cache.live_entries_at(OffsetDateTime::now_utc() + Duration::hours(2)), 0);
	assert_eq!(
		store.get(&client, &request).await.expect("Cached get should succeed."),
		Some("Bearer live".into()),
	);
}
