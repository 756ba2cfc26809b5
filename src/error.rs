//! Relay-level error types shared across the middleware, grant clients, and stores.

// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Opaque failure from the grant client; never reinterpreted by the relay.
	#[error(transparent)]
	Grant(#[from] GrantError),
	/// Opaque failure from the transport; never reinterpreted by the relay.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Grant succeeded but carried no usable access token.
	#[error("Grant response did not contain an access token.")]
	MissingToken,
	/// Grant returned a token scheme other than Bearer.
	#[error("Only Bearer tokens are supported, got `{token_type}`.")]
	UnsupportedTokenType {
		/// The token type reported by the grant client.
		token_type: String,
	},
	/// Composed Authorization value contains bytes the HTTP layer rejects.
	#[error("Composed Authorization header value is invalid.")]
	InvalidAuthorization(#[from] http::header::InvalidHeaderValue),
}

/// Failures raised by [`GrantClient`](crate::grant::GrantClient) implementations.
///
/// The relay treats every variant as opaque; it propagates the value to the
/// caller of the logical call without retrying or unwrapping it.
#[derive(Debug, ThisError)]
pub enum GrantError {
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint rejected the grant: {message}.")]
	Endpoint {
		/// Provider-supplied message summarizing the rejection.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Underlying HTTP client reported a network failure during the exchange.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl GrantError {
	/// Wraps a grant client's network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for GrantError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while sending the request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while sending the request.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
