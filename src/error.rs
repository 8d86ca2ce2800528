//! Crate-level error types shared across configuration, links, and the client runtime.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (network, HTTP status, malformed body).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// A cache-only read found nothing for the operation.
	#[error("No cached response exists for operation `{operation}`.")]
	CacheMiss {
		/// Operation name, or `<anonymous>`.
		operation: String,
	},
}

/// Configuration and validation failures raised while assembling a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Bearer token is empty or whitespace only.
	#[error("Bearer token must not be empty.")]
	EmptyToken,
	/// Environment variable carrying the token is not set.
	#[error("Environment variable `{var}` is not set or is not valid unicode.")]
	MissingToken {
		/// Name of the environment variable.
		var: String,
	},
	/// A header value contains bytes that cannot be sent over HTTP.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeaderValue {
		/// Header name.
		name: String,
		/// Underlying encoding failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// A header name is not a valid HTTP token.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Offending header name.
		name: String,
		/// Underlying parsing failure.
		#[source]
		source: http::header::InvalidHeaderName,
	},
	/// Endpoint cannot be parsed.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint(#[from] url::ParseError),
	/// No terminating transport was supplied and none can be built.
	#[error("Link chain has no terminating transport.")]
	MissingTransport,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, HTTP status, response decoding).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the GraphQL endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Endpoint answered with a non-success status.
	#[error("GraphQL endpoint responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
		/// Raw response body, lossily decoded.
		body: String,
	},
	/// Endpoint responded with a body that is not a GraphQL response document.
	#[error("GraphQL endpoint returned a malformed response.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Operation could not be encoded as a request body.
	#[error("Operation could not be serialized.")]
	RequestEncode(#[source] serde_json::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Retry-After hint carried by the failure, if any.
	pub fn retry_after(&self) -> Option<Duration> {
		match self {
			Self::Status { retry_after, .. } => *retry_after,
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
