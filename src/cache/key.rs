//! Stable cache keys derived from operations.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, operation::Operation};

/// Fingerprint identifying an operation's cached response.
///
/// The key is a base64 (no padding) SHA-256 digest over the operation name, the document text,
/// and the variables rendered with object keys sorted. Context headers do not participate.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);
impl CacheKey {
	/// Derives the key for `operation`.
	pub fn for_operation(operation: &Operation) -> Self {
		let mut hasher = Sha256::new();
		let mut variables = String::new();

		write_canonical(&JsonValue::Object(operation.variables.clone()), &mut variables);
		hasher.update(operation.operation_name.as_deref().unwrap_or_default().as_bytes());
		hasher.update([0u8]);
		hasher.update(operation.query.as_bytes());
		hasher.update([0u8]);
		hasher.update(variables.as_bytes());

		Self(STANDARD_NO_PAD.encode(hasher.finalize()))
	}

	/// Encoded fingerprint.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Debug for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "CacheKey({})", self.0)
	}
}
impl Display for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn write_canonical(value: &JsonValue, out: &mut String) {
	match value {
		JsonValue::Object(map) => {
			let sorted = map.iter().collect::<BTreeMap<_, _>>();

			out.push('{');

			for (i, (name, value)) in sorted.into_iter().enumerate() {
				if i > 0 {
					out.push(',');
				}

				out.push_str(&JsonValue::String(name.to_owned()).to_string());
				out.push(':');
				write_canonical(value, out);
			}

			out.push('}');
		},
		JsonValue::Array(items) => {
			out.push('[');

			for (i, item) in items.iter().enumerate() {
				if i > 0 {
					out.push(',');
				}

				write_canonical(item, out);
			}

			out.push(']');
		},
		scalar => out.push_str(&scalar.to_string()),
	}
}
