//! Transport seam between the relay and the network layer.
//!
//! The relay only ever talks to the network through [`Transport`]; it issues
//! at most two sends per logical call and awaits each one before continuing.
//! [`ReqwestTransport`] is the built-in implementation; any HTTP stack can be
//! plugged in by implementing the trait.

// self
use crate::{_prelude::*, error::TransportError, request::RelayRequest};

/// Plain byte-bodied HTTP request value exchanged with transports.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Plain byte-bodied HTTP response value returned by transports.
pub type HttpResponse = http::Response<Vec<u8>>;

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Network-layer contract invoked by the relay.
///
/// Implementations receive the fully prepared context (grant parameters
/// merged, Authorization header attached when applicable) and must resolve to
/// exactly one response or one [`TransportError`]. Transport failures are
/// opaque to the relay; it never reinterprets or retries them.
pub trait Transport
where
	Self: Send + Sync,
{
	/// Sends the request and resolves with the response.
	fn send<'a>(&'a self, request: &'a RelayRequest) -> TransportFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn send<'a>(&'a self, request: &'a RelayRequest) -> TransportFuture<'a> {
		let client = self.0.clone();
		let request = request.to_http_request();

		Box::pin(async move {
			let response = client
				.execute(request.try_into().map_err(TransportError::network)?)
				.await
				.map_err(TransportError::from)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(TransportError::from)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
