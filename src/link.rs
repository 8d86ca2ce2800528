//! Request-handling chain: ordered request steps terminated by a transport.
//!
//! A [`LinkChain`] applies every [`RequestStep`] in insertion order, then hands the prepared
//! [`Operation`] to its terminating [`Transport`]. Steps are plain synchronous transforms, so
//! preparing a request never performs I/O; only the transport talks to the network.

pub mod auth;
pub mod context;
#[cfg(feature = "reqwest")] pub mod http_link;

pub use auth::*;
pub use context::*;
#[cfg(feature = "reqwest")] pub use http_link::*;

// self
use crate::{_prelude::*, operation::Operation, response::GraphqlResponse};

/// Boxed future returned by [`Transport::execute`].
pub type LinkFuture<'a> = Pin<Box<dyn Future<Output = Result<GraphqlResponse>> + 'a + Send>>;

/// A non-terminating step that transforms an operation before it is sent.
pub trait RequestStep
where
	Self: Send + Sync,
{
	/// Returns the operation handed to the next step.
	fn prepare(&self, operation: Operation) -> Result<Operation>;
}

/// Terminating step that forwards an operation to its destination.
pub trait Transport
where
	Self: Send + Sync,
{
	/// Sends the operation and resolves with the parsed response.
	fn execute(&self, operation: Operation) -> LinkFuture<'_>;

	/// Destination URL, for transports that have one.
	fn endpoint(&self) -> Option<&Url> {
		None
	}
}

/// Ordered composition of request steps ending in a transport.
#[derive(Clone)]
pub struct LinkChain {
	steps: Vec<Arc<dyn RequestStep>>,
	transport: Arc<dyn Transport>,
}
impl LinkChain {
	/// Composes `steps`, applied in iteration order, in front of `transport`.
	pub fn new<I>(steps: I, transport: Arc<dyn Transport>) -> Self
	where
		I: IntoIterator<Item = Arc<dyn RequestStep>>,
	{
		Self { steps: steps.into_iter().collect(), transport }
	}

	/// Appends a step after the existing ones, still ahead of the transport.
	pub fn with_step(mut self, step: Arc<dyn RequestStep>) -> Self {
		self.steps.push(step);

		self
	}

	/// Number of request steps in front of the transport.
	pub fn step_count(&self) -> usize {
		self.steps.len()
	}

	/// Terminating transport.
	pub fn transport(&self) -> &Arc<dyn Transport> {
		&self.transport
	}

	/// Destination of the terminating transport, if it exposes one.
	pub fn endpoint(&self) -> Option<&Url> {
		self.transport.endpoint()
	}

	/// Runs every request step in order without touching the transport.
	pub fn prepare(&self, operation: Operation) -> Result<Operation> {
		self.steps.iter().try_fold(operation, |operation, step| step.prepare(operation))
	}

	/// Prepares the operation and forwards it to the transport.
	pub fn execute(&self, operation: Operation) -> LinkFuture<'_> {
		Box::pin(async move {
			let prepared = self.prepare(operation)?;

			self.transport.execute(prepared).await
		})
	}
}
impl Debug for LinkChain {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LinkChain")
			.field("steps", &self.steps.len())
			.field("endpoint", &self.endpoint().map(Url::as_str))
			.finish()
	}
}
