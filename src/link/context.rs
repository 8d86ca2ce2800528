//! Closure-driven context steps.

// self
use crate::{_prelude::*, link::RequestStep, operation::Operation};

/// Partial context returned by a [`SetContextLink`] closure.
#[derive(Clone, Debug, Default)]
pub struct ContextPatch {
	/// Headers merged into the operation context; same-named entries are replaced.
	pub headers: HeaderMap,
}
impl ContextPatch {
	/// Adds a header to the patch.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}
}

/// Request step that derives a [`ContextPatch`] from each operation and merges it in.
pub struct SetContextLink<F> {
	derive: F,
}
impl<F> SetContextLink<F>
where
	F: Fn(&Operation) -> Result<ContextPatch> + Send + Sync,
{
	/// Wraps the closure.
	pub fn new(derive: F) -> Self {
		Self { derive }
	}
}
impl<F> RequestStep for SetContextLink<F>
where
	F: Fn(&Operation) -> Result<ContextPatch> + Send + Sync,
{
	fn prepare(&self, mut operation: Operation) -> Result<Operation> {
		let patch = (self.derive)(&operation)?;

		operation.context.merge_headers(patch.headers);

		Ok(operation)
	}
}
impl<F> Debug for SetContextLink<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SetContextLink(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn closure_sees_operation_and_patch_is_merged() {
		let link = SetContextLink::new(|operation: &Operation| {
			let value = HeaderValue::try_from(operation.display_name())
				.map_err(|source| crate::error::ConfigError::InvalidHeaderValue {
					name: "x-operation".into(),
					source,
				})?;

			Ok(ContextPatch::default().with_header(HeaderName::from_static("x-operation"), value))
		});
		let operation = Operation::new("query Viewer { viewer { login } }")
			.with_operation_name("Viewer")
			.with_header("x-trace", "abc")
			.expect("Static header should be valid.");
		let prepared = link.prepare(operation).expect("Closure should succeed.");

		assert_eq!(prepared.context.headers["x-operation"], "Viewer");
		assert_eq!(prepared.context.headers["x-trace"], "abc");
	}
}
