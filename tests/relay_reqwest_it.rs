//! End-to-end relay runs over the reqwest transport and a mock provider.

// std
use std::sync::Arc;
// crates.io
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

const CLIENT_ID: &str = "relay-client";
const CLIENT_SECRET: &str = "relay-secret";

fn build_relay(server: &MockServer) -> OAuth2Relay<ReqwestTransport> {
	let issuer = server.url("");
	let token_endpoint =
		Url::parse(&server.url("/token")).expect("Mock token endpoint should parse.");
	let client = ClientIdentity::new(&issuer, CLIENT_ID)
		.expect("Client identity should be valid for relay tests.");
	let grant_client =
		HttpGrantClient::new(token_endpoint).with_client_secret(CLIENT_SECRET);

	OAuth2Relay::new(ReqwestTransport::default(), Arc::new(grant_client), client)
}

fn resource_request(server: &MockServer) -> RelayRequest {
	RelayRequest::new(
		http::Request::builder()
			.method("GET")
			.uri(server.url("/resource"))
			.body(Vec::new())
			.expect("Resource request should build."),
	)
}

#[tokio::test]
async fn eager_grant_authorizes_the_first_send() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"fresh-token\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let resource_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/resource").header("authorization", "Bearer fresh-token");
			then.status(200).body("resource-body");
		})
		.await;
	let relay = build_relay(&server);
	let response = relay
		.handle(resource_request(&server))
		.await
		.expect("Eager-grant round trip should succeed.");

	assert_eq!(response.status(), 200);
	assert_eq!(response.body(), b"resource-body");

	token_mock.assert_calls_async(1).await;
	resource_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn cached_store_reuses_the_token_across_logical_calls() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"cached-token\",\"token_type\":\"bearer\",\"expires_in\":1800}",
			);
		})
		.await;
	let resource_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/resource").header("authorization", "Bearer cached-token");
			then.status(200).body("resource-body");
		})
		.await;
	let relay = build_relay(&server)
		.with_store(Arc::new(CachedStore::new(MemoryCache::default())))
		.with_grant_params(GrantParams::new().with("scope", "api.read"));

	for _ in 0..2 {
		let response = relay
			.handle(resource_request(&server))
			.await
			.expect("Cached round trip should succeed.");

		assert_eq!(response.status(), 200);
	}

	token_mock.assert_calls_async(1).await;
	resource_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn unauthorized_first_send_triggers_one_grant_and_one_resend() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"retry-token\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let unauthorized_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/resource").header_missing("authorization");
			then.status(401);
		})
		.await;
	let authorized_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/resource").header("authorization", "Bearer retry-token");
			then.status(200).body("resource-body");
		})
		.await;
	let relay = build_relay(&server).with_authenticate_first(false);
	let response = relay
		.handle(resource_request(&server))
		.await
		.expect("Retry round trip should succeed.");

	assert_eq!(response.status(), 200);
	assert_eq!(response.body(), b"resource-body");

	token_mock.assert_calls_async(1).await;
	unauthorized_mock.assert_calls_async(1).await;
	authorized_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn token_endpoint_rejection_surfaces_as_a_grant_error() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let relay = build_relay(&server);
	let err = relay
		.handle(resource_request(&server))
		.await
		.expect_err("Token endpoint rejection should surface.");

	assert!(matches!(
		err,
		oauth2_relay::error::Error::Grant(oauth2_relay::error::GrantError::Endpoint {
			status: Some(400),
			..
		}),
	));

	token_mock.assert_calls_async(1).await;
}
