//! Demonstrates relaying a request through the default reqwest transport with an in-memory
//! token cache: the first call grants a token, the second reuses it.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oauth2_relay::{
	auth::{ClientIdentity, GrantParams},
	grant::HttpGrantClient,
	http::ReqwestTransport,
	relay::OAuth2Relay,
	request::RelayRequest,
	store::{CachedStore, MemoryCache},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let _resource_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/resource").header("authorization", "Bearer demo-access");
			then.status(200).body("hello from the resource server");
		})
		.await;
	let client = ClientIdentity::new(server.url(""), "demo-client")?;
	let grant_client = HttpGrantClient::new(Url::parse(&server.url("/token"))?)
		.with_client_secret("demo-secret");
	let relay = <OAuth2Relay<ReqwestTransport>>::new(
		ReqwestTransport::default(),
		Arc::new(grant_client),
		client,
	)
	.with_store(Arc::new(CachedStore::new(MemoryCache::default())))
	.with_grant_params(GrantParams::new().with("scope", "api.read"));

	for round in 1..=2 {
		let request = RelayRequest::new(
			http::Request::builder().method("GET").uri(server.url("/resource")).body(Vec::new())?,
		);
		let response = relay.handle(request).await?;

		println!(
			"round {round}: {} {}",
			response.status(),
			String::from_utf8_lossy(response.body()),
		);
	}

	Ok(())
}
