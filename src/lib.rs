//! GraphQL client configuration for the GitHub API: a bearer-token auth link, composable
//! request steps, an HTTP transport, and an in-memory response cache.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod link;
pub mod obs;
pub mod operation;
pub mod response;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::BearerToken,
		config::ClientConfig,
		link::{HttpLink, ReqwestHttpClient},
	};

	/// Token used by integration tests.
	pub const TEST_TOKEN: &str = "test-token-0123456789";

	/// Builds an HTTP link pointed at a mock server URL.
	pub fn test_http_link(endpoint: &str) -> HttpLink {
		let endpoint = Url::parse(endpoint).expect("Mock endpoint should be a valid URL.");

		HttpLink::with_client(
			endpoint,
			ReqwestHttpClient::user_agent().expect("Default reqwest client should build."),
		)
	}

	/// Builds a GitHub-shaped configuration whose transport targets `endpoint` instead of the
	/// real API.
	pub fn build_test_config(endpoint: &str) -> ClientConfig {
		let endpoint = Url::parse(endpoint).expect("Mock endpoint should be a valid URL.");

		ClientConfig::builder()
			.endpoint(endpoint)
			.token(BearerToken::new(TEST_TOKEN))
			.build()
			.expect("Test configuration should build.")
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use http::{HeaderMap, HeaderName, HeaderValue};
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
