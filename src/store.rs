//! Storage contracts and built-in authorization stores.
//!
//! Stores persist fully composed `Authorization` values (`Bearer <token>`),
//! keyed by the client identity and the request's grant parameters. Three
//! variants ship with the crate: [`DisabledStore`] (never reuses anything),
//! [`StaticStore`] (one fixed value), and [`CachedStore`] (TTL cache behind
//! the [`TtlCache`](cached::TtlCache) contract).

pub mod cached;
pub mod memory;

pub use cached::{CachedStore, HashAlgorithm, TtlCache};
pub use memory::MemoryCache;

// self
use crate::{_prelude::*, auth::ClientIdentity, request::RelayRequest};

/// Boxed future returned by [`AuthorizationStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for composed authorization values.
///
/// Implementations are shared across concurrent logical calls and must be
/// internally synchronized; two calls that miss the same key may both grant
/// and both `put`, in which case the last write wins.
pub trait AuthorizationStore
where
	Self: Send + Sync,
{
	/// Fetches the authorization value for the identity + request, if present.
	///
	/// Absence is a normal outcome, returned as `None`.
	fn get<'a>(
		&'a self,
		client: &'a ClientIdentity,
		request: &'a RelayRequest,
	) -> StoreFuture<'a, Option<String>>;

	/// Persists an authorization value, honoring `ttl` when provided.
	fn put<'a>(
		&'a self,
		client: &'a ClientIdentity,
		request: &'a RelayRequest,
		authorization: &'a str,
		ttl: Option<Duration>,
	) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`AuthorizationStore`] and cache implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Cache-key material could not be canonically serialized.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Store that never reuses authorizations across requests.
///
/// `get` always misses and `put` is a no-op; every request that needs
/// authorization performs its own grant. This is the default store.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledStore;
impl AuthorizationStore for DisabledStore {
	fn get<'a>(
		&'a self,
		_: &'a ClientIdentity,
		_: &'a RelayRequest,
	) -> StoreFuture<'a, Option<String>> {
		Box::pin(async { Ok(None) })
	}

	fn put<'a>(
		&'a self,
		_: &'a ClientIdentity,
		_: &'a RelayRequest,
		_: &'a str,
		_: Option<Duration>,
	) -> StoreFuture<'a, ()> {
		Box::pin(async { Ok(()) })
	}
}

/// Store that always answers with one fixed authorization value.
///
/// Useful for manually issued bearer tokens; grant results are never
/// persisted.
#[derive(Clone, Debug)]
pub struct StaticStore {
	authorization: String,
}
impl StaticStore {
	/// Creates a store around a literal authorization value (scheme included,
	/// e.g. `Bearer abc123`).
	pub fn new(authorization: impl Into<String>) -> Self {
		Self { authorization: authorization.into() }
	}
}
impl AuthorizationStore for StaticStore {
	fn get<'a>(
		&'a self,
		_: &'a ClientIdentity,
		_: &'a RelayRequest,
	) -> StoreFuture<'a, Option<String>> {
		Box::pin(async move { Ok(Some(self.authorization.clone())) })
	}

	fn put<'a>(
		&'a self,
		_: &'a ClientIdentity,
		_: &'a RelayRequest,
		_: &'a str,
		_: Option<Duration>,
	) -> StoreFuture<'a, ()> {
		Box::pin(async { Ok(()) })
	}
}
