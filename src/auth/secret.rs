//! Redacted bearer token wrapper.

// self
use crate::{_prelude::*, error::ConfigError};

/// Authorization scheme prefix sent with every request.
pub const BEARER_SCHEME: &str = "bearer";

/// Redacted bearer token keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);
impl BearerToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Wraps a token after rejecting empty or whitespace-only values.
	pub fn try_new(value: impl Into<String>) -> Result<Self, ConfigError> {
		let token = Self::new(value);

		token.validate()?;

		Ok(token)
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Fails when the token cannot be used as a credential.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.0.trim().is_empty() {
			return Err(ConfigError::EmptyToken);
		}

		Ok(())
	}

	/// Renders the `Authorization` header value (`bearer <token>`), marked sensitive.
	pub fn header_value(&self) -> Result<HeaderValue, ConfigError> {
		self.validate()?;

		let mut value = HeaderValue::try_from(format!("{BEARER_SCHEME} {}", self.0)).map_err(
			|source| ConfigError::InvalidHeaderValue {
				name: http::header::AUTHORIZATION.to_string(),
				source,
			},
		)?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl AsRef<str> for BearerToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BearerToken").field(&"<redacted>").finish()
	}
}
impl Display for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
