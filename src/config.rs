//! Client configuration: the link chain and cache handed to [`GraphqlClient`].
//!
//! [`ClientConfig::github`] is the zero-configuration entry point: it composes
//! `[AuthLink, HttpLink]` against the GitHub GraphQL endpoint and attaches a fresh
//! [`InMemoryCache`]. Building never performs network I/O; the token is validated once up front
//! and then re-read by the auth link for every request.
//!
//! [`GraphqlClient`]: crate::client::GraphqlClient

// self
use crate::{
	_prelude::*,
	auth::{BearerToken, EnvTokenSource, StaticTokenSource, TokenSource},
	cache::{InMemoryCache, ResponseCache},
	error::ConfigError,
	link::{AuthLink, LinkChain, RequestStep, Transport},
};
#[cfg(feature = "reqwest")]
use crate::link::{GITHUB_GRAPHQL_ENDPOINT, HttpLink, ReqwestHttpClient};

/// Transport chain plus response cache consumed by the client runtime.
#[derive(Clone)]
pub struct ClientConfig {
	/// Ordered request steps ending in a transport.
	pub link: LinkChain,
	/// Response cache.
	pub cache: Arc<dyn ResponseCache>,
}
impl ClientConfig {
	/// Starts a builder with GitHub defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// GitHub configuration authenticated with `token`.
	pub fn github(token: BearerToken) -> Result<Self> {
		Self::builder().token(token).build()
	}

	/// GitHub configuration reading its token from `GITHUB_TOKEN` on every request.
	pub fn from_env() -> Result<Self> {
		Self::builder().token_source(Arc::new(EnvTokenSource::github())).build()
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("link", &self.link)
			.field("cache_entries", &self.cache.len())
			.finish()
	}
}

/// Builder for [`ClientConfig`].
///
/// Without an explicit token or token source the builder reads `GITHUB_TOKEN`. Without an
/// explicit transport it builds an `HttpLink` for the configured endpoint, which defaults to the
/// GitHub GraphQL API.
#[derive(Default)]
pub struct ClientConfigBuilder {
	endpoint: Option<Url>,
	token: Option<BearerToken>,
	token_source: Option<Arc<dyn TokenSource>>,
	steps: Vec<Arc<dyn RequestStep>>,
	transport: Option<Arc<dyn Transport>>,
	#[cfg(feature = "reqwest")]
	http_client: Option<ReqwestHttpClient>,
	cache: Option<Arc<dyn ResponseCache>>,
}
impl ClientConfigBuilder {
	/// Overrides the endpoint used by the default HTTP transport.
	pub fn endpoint(mut self, url: Url) -> Self {
		self.endpoint = Some(url);

		self
	}

	/// Uses a fixed token; replaces any token source.
	pub fn token(mut self, token: BearerToken) -> Self {
		self.token = Some(token);
		self.token_source = None;

		self
	}

	/// Reads the token from `source` on every request; replaces any fixed token.
	pub fn token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
		self.token_source = Some(source);
		self.token = None;

		self
	}

	/// Adds a request step after the auth step and before the transport.
	pub fn step(mut self, step: Arc<dyn RequestStep>) -> Self {
		self.steps.push(step);

		self
	}

	/// Replaces the default HTTP transport. The endpoint setting is ignored when set.
	pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
		self.transport = Some(transport);

		self
	}

	/// Uses `client` for the default HTTP transport.
	#[cfg(feature = "reqwest")]
	pub fn http_client(mut self, client: ReqwestHttpClient) -> Self {
		self.http_client = Some(client);

		self
	}

	/// Uses `cache` instead of a fresh [`InMemoryCache`].
	pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
		self.cache = Some(cache);

		self
	}

	/// Validates the token and assembles the configuration.
	pub fn build(mut self) -> Result<ClientConfig> {
		let source: Arc<dyn TokenSource> = match (self.token.take(), self.token_source.take()) {
			(Some(token), _) => Arc::new(StaticTokenSource::new(token)?),
			(None, Some(source)) => source,
			(None, None) => Arc::new(EnvTokenSource::github()),
		};

		source.token()?.header_value()?;

		let transport = match self.transport.take() {
			Some(transport) => transport,
			None => self.default_transport()?,
		};
		let auth: Arc<dyn RequestStep> = Arc::new(AuthLink::new(source));
		let link = LinkChain::new(std::iter::once(auth).chain(self.steps), transport);
		let cache = self
			.cache
			.unwrap_or_else(|| Arc::new(InMemoryCache::default()) as Arc<dyn ResponseCache>);

		Ok(ClientConfig { link, cache })
	}

	#[cfg(feature = "reqwest")]
	fn default_transport(&mut self) -> Result<Arc<dyn Transport>> {
		let endpoint = match self.endpoint.take() {
			Some(url) => url,
			None => Url::parse(GITHUB_GRAPHQL_ENDPOINT).map_err(ConfigError::from)?,
		};
		let link = match self.http_client.take() {
			Some(client) => HttpLink::with_client(endpoint, client),
			None => HttpLink::new(endpoint)?,
		};

		Ok(Arc::new(link))
	}

	#[cfg(not(feature = "reqwest"))]
	fn default_transport(&mut self) -> Result<Arc<dyn Transport>> {
		Err(ConfigError::MissingTransport.into())
	}
}
impl Debug for ClientConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfigBuilder")
			.field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
			.field("token", &self.token)
			.field("steps", &self.steps.len())
			.field("transport", &self.transport.is_some())
			.finish()
	}
}
