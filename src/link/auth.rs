//! Authorization header injection.

// self
use crate::{
	_prelude::*,
	auth::{BearerToken, StaticTokenSource, TokenSource},
	error::ConfigError,
	link::RequestStep,
	operation::Operation,
};

/// Request step that merges `Authorization: bearer <token>` into every operation.
///
/// The token is read from the [`TokenSource`] once per request. Other headers already present in
/// the context are kept; an existing `Authorization` header is replaced.
#[derive(Clone)]
pub struct AuthLink {
	source: Arc<dyn TokenSource>,
}
impl AuthLink {
	/// Reads the token from `source` for every request.
	pub fn new(source: Arc<dyn TokenSource>) -> Self {
		Self { source }
	}

	/// Uses a fixed, validated token.
	pub fn with_token(token: BearerToken) -> Result<Self, ConfigError> {
		Ok(Self::new(Arc::new(StaticTokenSource::new(token)?)))
	}

	/// Header map this step merges into the next operation.
	pub fn headers(&self) -> Result<HeaderMap> {
		let value = self.source.token()?.header_value()?;
		let mut headers = HeaderMap::with_capacity(1);

		headers.insert(http::header::AUTHORIZATION, value);

		Ok(headers)
	}
}
impl RequestStep for AuthLink {
	fn prepare(&self, mut operation: Operation) -> Result<Operation> {
		operation.context.merge_headers(self.headers()?);

		Ok(operation)
	}
}
impl Debug for AuthLink {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("AuthLink(..)")
	}
}
