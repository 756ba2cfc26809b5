//! The authorization middleware: per-request refresh protocol and retry cap.

// std
use std::time::Instant;
// crates.io
use http::header;
// self
use crate::{
	_prelude::*,
	auth::{BearerCredential, ClientIdentity, GrantParams},
	grant::GrantClient,
	http::{HttpResponse, Transport},
	obs::{self, GrantObserver, GrantOutcome, NoopObserver, RelaySpan},
	request::RelayRequest,
	store::{AuthorizationStore, DisabledStore},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Relay specialized for the crate's default reqwest transport.
pub type ReqwestRelay = OAuth2Relay<ReqwestTransport>;

/// Decorates outgoing requests with bearer-token authorization.
///
/// Each logical call runs the refresh protocol: attach a cached credential
/// when one exists, optionally authorize eagerly, send, and on a 401/403
/// response authorize once more and resend exactly once. The relay owns the
/// grant client, store, and observer so [`handle`](Self::handle) can focus on
/// the decision logic; the transport is a type parameter so applications can
/// bring their own stack.
pub struct OAuth2Relay<T>
where
	T: ?Sized + Transport,
{
	transport: Arc<T>,
	grant_client: Arc<dyn GrantClient>,
	client: ClientIdentity,
	store: Arc<dyn AuthorizationStore>,
	grant_params: GrantParams,
	authenticate_first: bool,
	observer: Arc<dyn GrantObserver>,
}
impl<T> OAuth2Relay<T>
where
	T: ?Sized + Transport,
{
	/// Creates a relay with the default configuration: disabled store, empty
	/// grant-parameter defaults, eager authorization, no-op observer.
	pub fn new(
		transport: impl Into<Arc<T>>,
		grant_client: Arc<dyn GrantClient>,
		client: ClientIdentity,
	) -> Self {
		Self {
			transport: transport.into(),
			grant_client,
			client,
			store: Arc::new(DisabledStore),
			grant_params: GrantParams::new(),
			authenticate_first: true,
			observer: Arc::new(NoopObserver),
		}
	}

	/// Replaces the authorization store.
	pub fn with_store(mut self, store: Arc<dyn AuthorizationStore>) -> Self {
		self.store = store;

		self
	}

	/// Replaces the relay-level grant-parameter defaults.
	///
	/// Per-request parameters override these on key collision; the built-in
	/// `grant_type = client_credentials` sits underneath both.
	pub fn with_grant_params(mut self, grant_params: GrantParams) -> Self {
		self.grant_params = grant_params;

		self
	}

	/// Controls whether a store miss triggers a grant before the first send
	/// (`true`, the default) or the first send goes out unauthorized.
	pub fn with_authenticate_first(mut self, authenticate_first: bool) -> Self {
		self.authenticate_first = authenticate_first;

		self
	}

	/// Replaces the diagnostic observer.
	pub fn with_observer(mut self, observer: Arc<dyn GrantObserver>) -> Self {
		self.observer = observer;

		self
	}

	/// Runs one logical call: prepare, send, and on 401/403 re-authorize and
	/// resend exactly once, returning that second response unconditionally.
	pub async fn handle(&self, request: impl Into<RelayRequest>) -> Result<HttpResponse> {
		let span = RelaySpan::new("handle");
		let request = request.into();

		span.instrument(async move {
			let request = self.prepare(request).await?;
			let response = self.transport.send(&request).await?;
			let status = response.status().as_u16();

			if !matches!(status, 401 | 403) {
				return Ok(response);
			}

			self.observer.reauthorizing(&self.client, status);

			// One re-authorization and one resend at most; whatever comes
			// back the second time is the caller's answer.
			let request = self.authorize(request).await?;

			Ok(self.transport.send(&request).await?)
		})
		.await
	}

	/// Merges grant parameters and decides how the first send is authorized.
	async fn prepare(&self, request: RelayRequest) -> Result<RelayRequest> {
		let merged = GrantParams::merged(&self.grant_params, request.grant_params());
		let request = request.with_grant_params(merged);

		// An explicit Authorization header is a caller override; never
		// replace it before the first send.
		if request.has_header(header::AUTHORIZATION) {
			return Ok(request);
		}
		if let Some(authorization) = self.store.get(&self.client, &request).await? {
			let credential = BearerCredential::from_authorization(authorization);

			return request.with_authorization(&credential);
		}
		if self.authenticate_first {
			return self.authorize(request).await;
		}

		Ok(request)
	}

	/// Grants a fresh token, persists it, and attaches it to the request.
	async fn authorize(&self, request: RelayRequest) -> Result<RelayRequest> {
		let span = RelaySpan::new("grant");
		let outcome = span
			.instrument(async {
				obs::record_grant_outcome(GrantOutcome::Attempt);
				self.observer.grant_starting(&self.client);

				let started = Instant::now();
				let outcome =
					self.grant_client.grant(&self.client, request.grant_params()).await;

				self.observer.grant_finished(&self.client, started.elapsed(), outcome.is_ok());
				obs::record_grant_outcome(if outcome.is_ok() {
					GrantOutcome::Success
				} else {
					GrantOutcome::Failure
				});

				outcome
			})
			.await;
		let grant = outcome?;
		let credential = BearerCredential::try_from_grant(&grant)?;

		self.store
			.put(&self.client, &request, credential.as_str(), grant.lifetime())
			.await?;

		request.with_authorization(&credential)
	}
}
impl<T> Debug for OAuth2Relay<T>
where
	T: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth2Relay")
			.field("client", &self.client)
			.field("grant_params", &self.grant_params)
			.field("authenticate_first", &self.authenticate_first)
			.finish()
	}
}
