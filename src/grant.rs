//! Grant seam between the relay and the token-issuing layer.
//!
//! The relay only needs one operation from the OAuth 2.0 world: exchange a
//! parameter map for a token plus its lifetime. [`GrantClient`] is that seam;
//! [`HttpGrantClient`] is the built-in implementation that POSTs the
//! parameters to a token endpoint as a form and parses the standard JSON
//! token response. Protocol concerns beyond that (discovery, JWT validation,
//! introspection) stay outside this crate.

// self
use crate::{
	_prelude::*,
	auth::{ClientIdentity, GrantParams, TokenGrant},
	error::GrantError,
};

/// Boxed future returned by [`GrantClient::grant`].
pub type GrantFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TokenGrant, GrantError>> + 'a + Send>>;

/// Token-exchange contract invoked by the relay whenever it needs a fresh
/// authorization.
///
/// Failures are opaque [`GrantError`] values; the relay propagates them to
/// the caller without retrying.
pub trait GrantClient
where
	Self: Send + Sync,
{
	/// Exchanges the merged grant parameters for a token.
	fn grant<'a>(&'a self, client: &'a ClientIdentity, params: &'a GrantParams) -> GrantFuture<'a>;
}

/// Reqwest-backed grant client that POSTs a form to a token endpoint.
///
/// The form carries `client_id`, the optional `client_secret`, and every
/// grant parameter; JSON string values are sent verbatim and other JSON
/// values in their compact serialization.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct HttpGrantClient {
	client: ReqwestClient,
	token_endpoint: Url,
	client_secret: Option<String>,
}
#[cfg(feature = "reqwest")]
impl HttpGrantClient {
	/// Creates a client for the provided token endpoint with a default
	/// reqwest client.
	pub fn new(token_endpoint: Url) -> Self {
		Self::with_client(ReqwestClient::default(), token_endpoint)
	}

	/// Creates a client that reuses an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient, token_endpoint: Url) -> Self {
		Self { client, token_endpoint, client_secret: None }
	}

	/// Sets or replaces the client secret sent with each exchange.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	fn form(&self, client: &ClientIdentity, params: &GrantParams) -> Vec<(String, String)> {
		let mut form = vec![("client_id".to_owned(), client.client_id.to_string())];

		if let Some(secret) = &self.client_secret {
			form.push(("client_secret".to_owned(), secret.clone()));
		}

		for (key, value) in params.iter() {
			let rendered = match value {
				serde_json::Value::String(s) => s.clone(),
				other => other.to_string(),
			};

			form.push((key.to_owned(), rendered));
		}

		form
	}
}
#[cfg(feature = "reqwest")]
impl GrantClient for HttpGrantClient {
	fn grant<'a>(&'a self, client: &'a ClientIdentity, params: &'a GrantParams) -> GrantFuture<'a> {
		let request = self
			.client
			.post(self.token_endpoint.clone())
			.form(&self.form(client, params));

		Box::pin(async move {
			let response = request.send().await.map_err(GrantError::from)?;
			let status = response.status();
			let body = response.bytes().await.map_err(GrantError::from)?;

			if !status.is_success() {
				return Err(GrantError::Endpoint {
					message: String::from_utf8_lossy(&body).into_owned(),
					status: Some(status.as_u16()),
				});
			}

			let mut deserializer = serde_json::Deserializer::from_slice(&body);

			serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
				GrantError::ResponseParse { source, status: Some(status.as_u16()) }
			})
		})
	}
}
#[cfg(feature = "reqwest")]
impl Debug for HttpGrantClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HttpGrantClient")
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("client_secret_set", &self.client_secret.is_some())
			.finish()
	}
}
