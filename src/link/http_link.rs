//! Reqwest-backed terminating transport.
//!
//! [`HttpLink`] POSTs `{"query", "operationName", "variables"}` to its endpoint with the headers
//! accumulated in the operation context. A non-success status surfaces as
//! [`TransportError::Status`] carrying any `Retry-After` hint; GraphQL-level `errors` arrive
//! inside the returned [`GraphqlResponse`] and are left to the caller.

// std
use std::ops::Deref;
// crates.io
use http::header::{ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	link::{LinkFuture, Transport},
	obs,
	operation::{Operation, OperationContext, RequestBody},
	response::GraphqlResponse,
};

/// GitHub GraphQL API endpoint.
pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// `User-Agent` sent by clients built with [`ReqwestHttpClient::user_agent`].
pub const DEFAULT_USER_AGENT: &str =
	concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// GitHub rejects API requests without a `User-Agent`, which reqwest does not send by default;
/// prefer [`ReqwestHttpClient::user_agent`] over [`Default`] when talking to the real API.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that identifies itself with [`DEFAULT_USER_AGENT`].
	pub fn user_agent() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().user_agent(DEFAULT_USER_AGENT).build()?;

		Ok(Self(client))
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Terminating transport that sends operations over HTTP.
#[derive(Clone, Debug)]
pub struct HttpLink {
	endpoint: Url,
	client: ReqwestHttpClient,
}
impl HttpLink {
	/// Binds a new user-agent-carrying client to `endpoint`. No request is made.
	pub fn new(endpoint: Url) -> Result<Self, ConfigError> {
		Ok(Self::with_client(endpoint, ReqwestHttpClient::user_agent()?))
	}

	/// Binds an existing client to `endpoint`.
	pub fn with_client(endpoint: Url, client: ReqwestHttpClient) -> Self {
		Self { endpoint, client }
	}

	/// Binds to [`GITHUB_GRAPHQL_ENDPOINT`].
	pub fn github() -> Result<Self, ConfigError> {
		Self::new(Url::parse(GITHUB_GRAPHQL_ENDPOINT)?)
	}

	/// Endpoint every request is posted to.
	pub fn url(&self) -> &Url {
		&self.endpoint
	}

	fn request_headers(context: OperationContext) -> HeaderMap {
		let mut merged = OperationContext::default();

		merged.headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
		merged.headers.insert(ACCEPT, HeaderValue::from_static(JSON));
		merged.merge_headers(context.headers);

		merged.headers
	}

	async fn send(&self, operation: Operation) -> Result<GraphqlResponse> {
		let body = serde_json::to_vec(&RequestBody::from(&operation))
			.map_err(TransportError::RequestEncode)?;
		let headers = Self::request_headers(operation.context);
		let response = self
			.client
			.post(self.endpoint.clone())
			.headers(headers)
			.body(body)
			.send()
			.await
			.map_err(TransportError::from)?;
		let status = response.status();
		let retry_after = parse_retry_after(response.headers());

		obs::trace_http_exchange(&self.endpoint, status.as_u16());

		let bytes = response.bytes().await.map_err(TransportError::from)?;

		if !status.is_success() {
			return Err(TransportError::Status {
				status: status.as_u16(),
				retry_after,
				body: String::from_utf8_lossy(&bytes).into_owned(),
			}
			.into());
		}

		Ok(GraphqlResponse::from_slice(&bytes, Some(status.as_u16()))?)
	}
}
impl Transport for HttpLink {
	fn execute(&self, operation: Operation) -> LinkFuture<'_> {
		Box::pin(self.send(operation))
	}

	fn endpoint(&self) -> Option<&Url> {
		Some(&self.endpoint)
	}
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return i64::try_from(secs).ok().map(Duration::seconds);
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn github_link_targets_literal_endpoint() {
		let link = HttpLink::github().expect("Default reqwest client should build.");

		assert_eq!(link.url().as_str(), "https://api.github.com/graphql");
		assert_eq!(Transport::endpoint(&link).map(Url::as_str), Some(GITHUB_GRAPHQL_ENDPOINT));
	}

	#[test]
	fn context_headers_override_defaults() {
		let mut context = OperationContext::default();

		context
			.headers
			.insert(ACCEPT, HeaderValue::from_static("application/graphql-response+json"));
		context.headers.insert("x-custom", HeaderValue::from_static("1"));

		let headers = HttpLink::request_headers(context);

		assert_eq!(headers[CONTENT_TYPE], JSON);
		assert_eq!(headers[ACCEPT], "application/graphql-response+json");
		assert_eq!(headers["x-custom"], "1");
		assert_eq!(headers.len(), 3);
	}

	#[test]
	fn retry_after_parses_delta_seconds() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("60"));

		assert_eq!(parse_retry_after(&headers), Some(Duration::seconds(60)));
	}

	#[test]
	fn retry_after_rejects_out_of_range_seconds() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("18446744073709551615"));

		assert_eq!(parse_retry_after(&headers), None);

		headers.insert(RETRY_AFTER, HeaderValue::from_static("9223372036854775807"));

		assert_eq!(parse_retry_after(&headers), Some(Duration::seconds(i64::MAX)));
	}

	#[test]
	fn retry_after_ignores_past_dates_and_garbage() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));

		assert_eq!(parse_retry_after(&headers), None);

		headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));

		assert_eq!(parse_retry_after(&headers), None);
		assert_eq!(parse_retry_after(&HeaderMap::new()), None);
	}
}
