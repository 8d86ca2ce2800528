//! Prints the login of the account behind `GITHUB_TOKEN`.
//!
//! ```sh
//! GITHUB_TOKEN=ghp_... cargo run --example github_viewer
//! ```
//!
//! The second query is answered from the in-memory cache without a network round trip.

// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use graphql_link::{
	client::{FetchPolicy, GraphqlClient},
	config::ClientConfig,
	operation::Operation,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client = GraphqlClient::new(ClientConfig::from_env()?);
	let viewer = Operation::new("query Viewer { viewer { login } }").with_operation_name("Viewer");
	let response = client.query(viewer.clone(), FetchPolicy::CacheFirst).await?;

	if let Some(error) = response.errors.first() {
		return Err(eyre!("GitHub rejected the query: {}", error.message));
	}

	let login = response
		.data
		.as_ref()
		.and_then(|data| data.pointer("/viewer/login"))
		.and_then(|login| login.as_str())
		.ok_or_else(|| eyre!("Response did not include viewer.login."))?;

	println!("Authenticated as {login}.");

	client.query(viewer, FetchPolicy::CacheOnly).await?;

	println!("Second lookup served from cache ({} entry).", client.config().cache.len());

	Ok(())
}
