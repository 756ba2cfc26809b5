//! Rust's drop-in OAuth 2.0 request relay—attach cached bearer tokens to outgoing HTTP requests,
//! re-authorize once on 401/403, and plug in any token store or transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod grant;
pub mod http;
pub mod obs;
pub mod relay;
pub mod request;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::ClientIdentity,
		grant::HttpGrantClient,
		http::ReqwestTransport,
		relay::OAuth2Relay,
	};

	/// Relay type alias used by reqwest-backed integration tests.
	pub type ReqwestTestRelay = OAuth2Relay<ReqwestTransport>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_client() -> ReqwestClient {
		ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.")
	}

	/// Constructs a default-configuration relay wired to the provided token endpoint over the
	/// insecure test client; tests chain `with_*` builders for their scenario.
	pub fn build_reqwest_test_relay(
		token_endpoint: Url,
		issuer: &str,
		client_id: &str,
		client_secret: &str,
	) -> ReqwestTestRelay {
		let client = ClientIdentity::new(issuer, client_id)
			.expect("Failed to build client identity for tests.");
		let grant_client = HttpGrantClient::with_client(test_reqwest_client(), token_endpoint)
			.with_client_secret(client_secret);
		let transport = ReqwestTransport::with_client(test_reqwest_client());

		<OAuth2Relay<ReqwestTransport>>::new(transport, Arc::new(grant_client), client)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use time;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
