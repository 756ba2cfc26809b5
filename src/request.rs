//! Immutable request context carrying the outbound request and its grant parameters.

// crates.io
use http::{
	HeaderMap, HeaderName, HeaderValue, Method, Uri, Version,
	header::{self, AsHeaderName},
};
use serde_json::Value;
// self
use crate::{_prelude::*, auth::{BearerCredential, GrantParams}, http::HttpRequest};

/// Outbound request plus the grant parameters tied to it.
///
/// All mutators consume `self` and return a fresh value, so a context handed
/// to a collaborator can never be mutated behind its back. Cloning rebuilds
/// the underlying [`HttpRequest`] field by field (it is not `Clone` itself).
pub struct RelayRequest {
	request: HttpRequest,
	grant_params: GrantParams,
}
impl RelayRequest {
	/// Wraps a plain HTTP request with an empty grant-parameter bag.
	pub fn new(request: HttpRequest) -> Self {
		Self { request, grant_params: GrantParams::new() }
	}

	/// HTTP method of the wrapped request.
	pub fn method(&self) -> &Method {
		self.request.method()
	}

	/// Target URI of the wrapped request.
	pub fn uri(&self) -> &Uri {
		self.request.uri()
	}

	/// Protocol version of the wrapped request.
	pub fn version(&self) -> Version {
		self.request.version()
	}

	/// All headers of the wrapped request.
	pub fn headers(&self) -> &HeaderMap {
		self.request.headers()
	}

	/// Looks up a single header value.
	pub fn header(&self, name: impl AsHeaderName) -> Option<&HeaderValue> {
		self.request.headers().get(name)
	}

	/// Returns `true` if the wrapped request carries the header.
	pub fn has_header(&self, name: impl AsHeaderName) -> bool {
		self.request.headers().contains_key(name)
	}

	/// Body bytes of the wrapped request.
	pub fn body(&self) -> &[u8] {
		self.request.body()
	}

	/// Grant parameters attached to this request.
	pub fn grant_params(&self) -> &GrantParams {
		&self.grant_params
	}

	/// Replaces the HTTP method.
	pub fn with_method(mut self, method: Method) -> Self {
		*self.request.method_mut() = method;

		self
	}

	/// Replaces the target URI.
	pub fn with_uri(mut self, uri: Uri) -> Self {
		*self.request.uri_mut() = uri;

		self
	}

	/// Replaces the protocol version.
	pub fn with_version(mut self, version: Version) -> Self {
		*self.request.version_mut() = version;

		self
	}

	/// Sets a header, replacing every existing value under that name.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.request.headers_mut().insert(name, value);

		self
	}

	/// Appends a header value without touching existing ones.
	pub fn with_added_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.request.headers_mut().append(name, value);

		self
	}

	/// Removes every value of a header.
	pub fn without_header(mut self, name: impl AsHeaderName) -> Self {
		self.request.headers_mut().remove(name);

		self
	}

	/// Replaces the body bytes.
	pub fn with_body(mut self, body: Vec<u8>) -> Self {
		*self.request.body_mut() = body;

		self
	}

	/// Replaces the whole grant-parameter bag.
	pub fn with_grant_params(mut self, grant_params: GrantParams) -> Self {
		self.grant_params = grant_params;

		self
	}

	/// Adds or replaces a single grant parameter.
	pub fn with_grant_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.grant_params = self.grant_params.with(key, value);

		self
	}

	/// Removes a single grant parameter.
	pub fn without_grant_param(mut self, key: &str) -> Self {
		self.grant_params = self.grant_params.without(key);

		self
	}

	/// Attaches a bearer credential as the Authorization header.
	///
	/// Any prior Authorization value is removed first, so attaching is a
	/// replace, never an append.
	pub fn with_authorization(self, credential: &BearerCredential) -> Result<Self> {
		let value = HeaderValue::from_str(credential.as_str())?;
		let mut new = self.without_header(header::AUTHORIZATION);

		new.request.headers_mut().insert(header::AUTHORIZATION, value);

		Ok(new)
	}

	/// Consumes the context and returns the wrapped HTTP request.
	pub fn into_http_request(self) -> HttpRequest {
		self.request
	}

	/// Rebuilds an owned copy of the wrapped HTTP request.
	pub fn to_http_request(&self) -> HttpRequest {
		clone_http_request(&self.request)
	}
}
impl From<HttpRequest> for RelayRequest {
	fn from(request: HttpRequest) -> Self {
		Self::new(request)
	}
}
impl Clone for RelayRequest {
	fn clone(&self) -> Self {
		Self { request: clone_http_request(&self.request), grant_params: self.grant_params.clone() }
	}
}
impl Debug for RelayRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RelayRequest")
			.field("method", self.request.method())
			.field("uri", self.request.uri())
			.field("grant_params", &self.grant_params)
			.finish()
	}
}

fn clone_http_request(request: &HttpRequest) -> HttpRequest {
	let mut cloned = HttpRequest::new(request.body().clone());

	*cloned.method_mut() = request.method().clone();
	*cloned.uri_mut() = request.uri().clone();
	*cloned.version_mut() = request.version();
	*cloned.headers_mut() = request.headers().clone();

	cloned
}
