//! GraphQL response documents.

// self
use crate::{_prelude::*, error::TransportError};

/// A single entry of the response `errors` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
	/// Human-readable message.
	pub message: String,
	/// Source locations, when reported.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub locations: Vec<ErrorLocation>,
	/// Response path of the failing field.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub path: Vec<JsonValue>,
	/// Error type reported by GitHub (`NOT_FOUND`, `FORBIDDEN`, ...).
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Vendor extensions.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extensions: Option<JsonMap<String, JsonValue>>,
}

/// Line/column pair inside the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
	/// 1-based line.
	pub line: u32,
	/// 1-based column.
	pub column: u32,
}

/// Parsed GraphQL response document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
	/// Result data, absent when execution failed before producing any.
	#[serde(default)]
	pub data: Option<JsonValue>,
	/// Field or request errors.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<GraphqlError>,
	/// Vendor extensions.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extensions: Option<JsonMap<String, JsonValue>>,
}
impl GraphqlResponse {
	/// Parses a response body, reporting the JSON path of any mismatch.
	pub fn from_slice(bytes: &[u8], status: Option<u16>) -> Result<Self, TransportError> {
		let mut deserializer = serde_json::Deserializer::from_slice(bytes);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| TransportError::ResponseParse { source, status })
	}

	/// Whether the response carries any GraphQL errors.
	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}
}
