//! Demonstrates pinning a manually issued bearer token with [`StaticStore`]: the relay never
//! contacts the token endpoint because the store always answers.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oauth2_relay::{
	auth::ClientIdentity,
	grant::HttpGrantClient,
	http::ReqwestTransport,
	relay::OAuth2Relay,
	request::RelayRequest,
	store::StaticStore,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let _resource_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/resource").header("authorization", "Bearer pinned-token");
			then.status(200).body("hello from the resource server");
		})
		.await;
	let client = ClientIdentity::new(server.url(""), "demo-client")?;
	// The grant client is wired but never invoked while the static store answers.
	let grant_client = HttpGrantClient::new(Url::parse(&server.url("/token"))?);
	let relay = <OAuth2Relay<ReqwestTransport>>::new(
		ReqwestTransport::default(),
		Arc::new(grant_client),
		client,
	)
	.with_store(Arc::new(StaticStore::new("Bearer pinned-token")));
	let request = RelayRequest::new(
		http::Request::builder().method("GET").uri(server.url("/resource")).body(Vec::new())?,
	);
	let response = relay.handle(request).await?;

	println!("{} {}", response.status(), String::from_utf8_lossy(response.body()));

	Ok(())
}
