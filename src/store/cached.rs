//! TTL-cache-backed [`AuthorizationStore`] and its cache-key derivation.

// std
use std::fmt::Write;
// crates.io
use sha1::Sha1;
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::{ClientIdentity, GrantParams},
	request::RelayRequest,
	store::{AuthorizationStore, StoreError, StoreFuture},
};

/// Default lifetime applied when the grant reports no `expires_in`.
pub const DEFAULT_TTL: Duration = Duration::seconds(1800);

/// Boxed future returned by [`TtlCache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Generic TTL key-value cache contract the host application supplies.
///
/// Backends must be safe under concurrent access from multiple in-flight
/// logical calls; the crate ships [`MemoryCache`](crate::store::MemoryCache)
/// for tests and single-process deployments.
pub trait TtlCache
where
	Self: Send + Sync,
{
	/// Fetches a live value; expired entries must be reported as `None`.
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>>;

	/// Stores a value that expires after `ttl`.
	fn set<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> CacheFuture<'a, ()>;
}

/// Digest used to derive cache keys from the identity + grant parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashAlgorithm {
	/// SHA-1, the default.
	#[default]
	Sha1,
	/// SHA-256, for deployments that standardize on it.
	Sha256,
}
impl HashAlgorithm {
	fn digest_hex(self, material: &[u8]) -> String {
		let digest = match self {
			Self::Sha1 => Sha1::digest(material).to_vec(),
			Self::Sha256 => Sha256::digest(material).to_vec(),
		};

		digest.iter().fold(String::with_capacity(digest.len() * 2), |mut hex, byte| {
			let _ = write!(hex, "{byte:02x}");

			hex
		})
	}
}

/// Deterministic cache key for one `(issuer, client id, grant params)` triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);
impl CacheKey {
	/// Computes the key by hashing the canonical JSON serialization of the
	/// triple; [`GrantParams`] keeps its keys sorted, so identical triples
	/// always serialize and hash identically.
	pub fn compute(
		algorithm: HashAlgorithm,
		client: &ClientIdentity,
		grant_params: &GrantParams,
	) -> Result<Self, StoreError> {
		#[derive(Serialize)]
		struct Material<'a> {
			issuer: &'a str,
			client_id: &'a str,
			grant_params: &'a GrantParams,
		}

		let material = serde_json::to_vec(&Material {
			issuer: client.issuer.as_ref(),
			client_id: client.client_id.as_ref(),
			grant_params,
		})
		.map_err(|e| StoreError::Serialization {
			message: format!("Failed to serialize cache-key material: {e}"),
		})?;

		Ok(Self(algorithm.digest_hex(&material)))
	}

	/// The derived key as a hex string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// [`AuthorizationStore`] that delegates to a generic TTL cache.
pub struct CachedStore<C> {
	cache: Arc<C>,
	hash_algorithm: HashAlgorithm,
	default_ttl: Duration,
}
impl<C> CachedStore<C>
where
	C: TtlCache,
{
	/// Wraps a cache backend with the default hash algorithm and TTL.
	pub fn new(cache: impl Into<Arc<C>>) -> Self {
		Self {
			cache: cache.into(),
			hash_algorithm: HashAlgorithm::default(),
			default_ttl: DEFAULT_TTL,
		}
	}

	/// Overrides the digest used for cache keys.
	pub fn with_hash_algorithm(mut self, hash_algorithm: HashAlgorithm) -> Self {
		self.hash_algorithm = hash_algorithm;

		self
	}

	/// Overrides the TTL applied when the grant reports no lifetime.
	pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
		self.default_ttl = default_ttl;

		self
	}

	fn key(&self, client: &ClientIdentity, request: &RelayRequest) -> Result<CacheKey, StoreError> {
		CacheKey::compute(self.hash_algorithm, client, request.grant_params())
	}
}
impl<C> AuthorizationStore for CachedStore<C>
where
	C: TtlCache,
{
	fn get<'a>(
		&'a self,
		client: &'a ClientIdentity,
		request: &'a RelayRequest,
	) -> StoreFuture<'a, Option<String>> {
		Box::pin(async move {
			let key = self.key(client, request)?;

			self.cache.get(key.as_str()).await
		})
	}

	fn put<'a>(
		&'a self,
		client: &'a ClientIdentity,
		request: &'a RelayRequest,
		authorization: &'a str,
		ttl: Option<Duration>,
	) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let key = self.key(client, request)?;

			self.cache.set(key.as_str(), authorization, ttl.unwrap_or(self.default_ttl)).await
		})
	}
}
impl<C> Debug for CachedStore<C> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedStore")
			.field("hash_algorithm", &self.hash_algorithm)
			.field("default_ttl", &self.default_ttl)
			.finish()
	}
}
