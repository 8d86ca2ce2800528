//! Token sources consulted by the auth link on every request.

// std
use std::env;
// self
use crate::{_prelude::*, auth::BearerToken, error::ConfigError};

/// Environment variable read by [`EnvTokenSource::github`].
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Supplies the bearer token attached to outgoing requests.
///
/// Implementations are consulted once per request, so a source backed by a secret store can
/// rotate credentials without rebuilding the link chain.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Returns the token for the next request.
	fn token(&self) -> Result<BearerToken>;
}

/// Source returning the same token for every request.
#[derive(Clone, Debug)]
pub struct StaticTokenSource(BearerToken);
impl StaticTokenSource {
	/// Wraps a token after validating it.
	pub fn new(token: BearerToken) -> Result<Self, ConfigError> {
		token.validate()?;

		Ok(Self(token))
	}
}
impl TokenSource for StaticTokenSource {
	fn token(&self) -> Result<BearerToken> {
		Ok(self.0.clone())
	}
}

/// Source reading the token from an environment variable on each call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvTokenSource {
	/// Variable name.
	pub var: String,
}
impl EnvTokenSource {
	/// Reads from the named variable.
	pub fn new(var: impl Into<String>) -> Self {
		Self { var: var.into() }
	}

	/// Reads from `GITHUB_TOKEN`.
	pub fn github() -> Self {
		Self::new(GITHUB_TOKEN_VAR)
	}

	fn read(&self) -> Result<BearerToken, ConfigError> {
		let raw = env::var(&self.var)
			.map_err(|_| ConfigError::MissingToken { var: self.var.clone() })?;

		BearerToken::try_new(raw)
	}
}
impl TokenSource for EnvTokenSource {
	fn token(&self) -> Result<BearerToken> {
		Ok(self.read()?)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn static_source_rejects_blank_tokens() {
		assert!(matches!(
			StaticTokenSource::new(BearerToken::new("")),
			Err(ConfigError::EmptyToken)
		));

		let source = StaticTokenSource::new(BearerToken::new("abc"))
			.expect("Non-empty token should be accepted.");

		assert_eq!(source.token().expect("Static source should not fail.").expose(), "abc");
	}

	#[test]
	fn env_source_reports_missing_variable() {
		let source = EnvTokenSource::new("GRAPHQL_LINK_TEST_TOKEN_NEVER_SET");
		let err = source.token().expect_err("Unset variable should fail.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::MissingToken { ref var })
				if var == "GRAPHQL_LINK_TEST_TOKEN_NEVER_SET"
		));
	}

	#[test]
	fn env_source_reads_on_every_call() {
		const VAR: &str = "GRAPHQL_LINK_TEST_TOKEN_ROTATING";

		let source = EnvTokenSource::new(VAR);

		// SAFETY: the variable name is unique to this test.
		unsafe { env::set_var(VAR, "first") };

		assert_eq!(source.token().expect("Variable should be readable.").expose(), "first");

		// SAFETY: the variable name is unique to this test.
		unsafe { env::set_var(VAR, "second") };

		assert_eq!(source.token().expect("Variable should be readable.").expose(), "second");

		// SAFETY: the variable name is unique to this test.
		unsafe { env::set_var(VAR, "   ") };

		assert!(matches!(source.token(), Err(Error::Config(ConfigError::EmptyToken))));
	}

	#[test]
	fn github_source_targets_github_token() {
		assert_eq!(EnvTokenSource::github().var, "GITHUB_TOKEN");
	}
}
