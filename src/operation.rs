//! GraphQL operations and the per-request context threaded through the link chain.

// self
use crate::{_prelude::*, error::ConfigError};

/// Label used for operations without a name.
pub const ANONYMOUS_OPERATION: &str = "<anonymous>";

/// Ambient per-request data visible to every request step.
#[derive(Clone, Debug, Default)]
pub struct OperationContext {
	/// Headers sent with the HTTP request.
	pub headers: HeaderMap,
}
impl OperationContext {
	/// Merges `headers` into the context, replacing same-named entries and keeping the rest.
	pub fn merge_headers(&mut self, headers: HeaderMap) {
		let mut last = None;

		for (name, value) in headers {
			// `HeaderMap::into_iter` yields `None` names for additional values of the last name.
			let name = match name {
				Some(name) => {
					self.headers.remove(&name);
					last = Some(name.clone());

					name
				},
				None => match &last {
					Some(name) => name.clone(),
					None => continue,
				},
			};

			self.headers.append(name, value);
		}
	}
}

/// A single GraphQL request on its way through the link chain.
#[derive(Clone, Debug)]
pub struct Operation {
	/// Document text.
	pub query: String,
	/// Optional operation name used to select an operation in multi-operation documents.
	pub operation_name: Option<String>,
	/// Variables object.
	pub variables: JsonMap<String, JsonValue>,
	/// Per-request context.
	pub context: OperationContext,
}
impl Operation {
	/// Creates an operation from document text.
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			operation_name: None,
			variables: JsonMap::new(),
			context: OperationContext::default(),
		}
	}

	/// Sets the operation name.
	pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
		self.operation_name = Some(name.into());

		self
	}

	/// Replaces the variables object.
	pub fn with_variables(mut self, variables: JsonMap<String, JsonValue>) -> Self {
		self.variables = variables;

		self
	}

	/// Sets a single variable.
	pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
		self.variables.insert(name.into(), value.into());

		self
	}

	/// Adds a request header, replacing any previous value under the same name.
	pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
		let header_name = HeaderName::try_from(name)
			.map_err(|source| ConfigError::InvalidHeaderName { name: name.to_owned(), source })?;
		let header_value = HeaderValue::try_from(value)
			.map_err(|source| ConfigError::InvalidHeaderValue { name: name.to_owned(), source })?;

		self.context.headers.insert(header_name, header_value);

		Ok(self)
	}

	/// Operation name or [`ANONYMOUS_OPERATION`].
	pub fn display_name(&self) -> &str {
		self.operation_name.as_deref().unwrap_or(ANONYMOUS_OPERATION)
	}

	/// Returns the kind of the operation the server will execute.
	///
	/// That is the definition named by `operation_name` when one matches, otherwise the first
	/// operation definition in the document. Fragment definitions never count.
	pub fn kind(&self) -> OperationKind {
		let definitions = operation_definitions(&self.query);
		let named = self
			.operation_name
			.as_deref()
			.and_then(|name| definitions.iter().find(|(_, found)| *found == Some(name)));

		named.or_else(|| definitions.first()).map_or(OperationKind::Query, |(kind, _)| *kind)
	}

	/// Whether [`kind`](Self::kind) resolves to a mutation.
	pub fn is_mutation(&self) -> bool {
		self.kind() == OperationKind::Mutation
	}
}

/// Kind of GraphQL operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Read operation; also used for shorthand `{ ... }` documents.
	Query,
	/// Write operation.
	Mutation,
	/// Streaming operation.
	Subscription,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Query => "query",
			OperationKind::Mutation => "mutation",
			OperationKind::Subscription => "subscription",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Top-level operation definitions in document order, with their names when present.
fn operation_definitions(document: &str) -> Vec<(OperationKind, Option<&str>)> {
	let bytes = document.as_bytes();
	let mut definitions = Vec::new();
	let mut i = 0;

	loop {
		i = skip_ignored(bytes, i);

		let Some(&byte) = bytes.get(i) else { break };

		// Shorthand `{ ... }` query.
		if byte == b'{' {
			definitions.push((OperationKind::Query, None));
			i = skip_definition(bytes, i);

			continue;
		}

		let keyword_end = scan_name(bytes, i);

		if keyword_end == i {
			i += 1;

			continue;
		}

		let kind = match &document[i..keyword_end] {
			"query" => Some(OperationKind::Query),
			"mutation" => Some(OperationKind::Mutation),
			"subscription" => Some(OperationKind::Subscription),
			_ => None,
		};

		if let Some(kind) = kind {
			let name_start = skip_ignored(bytes, keyword_end);
			let name_end = scan_name(bytes, name_start);

			let name = (name_end > name_start).then(|| &document[name_start..name_end]);

			definitions.push((kind, name));
		}

		i = skip_definition(bytes, keyword_end);
	}

	definitions
}

fn skip_ignored(bytes: &[u8], mut i: usize) -> usize {
	while let Some(&byte) = bytes.get(i) {
		match byte {
			b' ' | b'\t' | b'\n' | b'\r' | b',' => i += 1,
			b'#' => {
				i = bytes[i..].iter().position(|&b| b == b'\n').map_or(bytes.len(), |n| i + n);
			},
			_ if bytes[i..].starts_with(BOM) => i += BOM.len(),
			_ => break,
		}
	}

	i
}

fn scan_name(bytes: &[u8], mut i: usize) -> usize {
	while bytes.get(i).is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_') {
		i += 1;
	}

	i
}

/// Returns the index just past the closing brace of the definition starting at `i`.
fn skip_definition(bytes: &[u8], mut i: usize) -> usize {
	let mut depth = 0_usize;

	while let Some(&byte) = bytes.get(i) {
		match byte {
			b'#' => {
				i = skip_ignored(bytes, i);

				continue;
			},
			b'"' => {
				i = skip_string(bytes, i);

				continue;
			},
			b'{' | b'(' | b'[' => depth += 1,
			b')' | b']' => depth = depth.saturating_sub(1),
			b'}' => {
				depth = depth.saturating_sub(1);

				if depth == 0 {
					return i + 1;
				}
			},
			_ => (),
		}

		i += 1;
	}

	i
}

/// Returns the index just past the string literal opening at `i`.
fn skip_string(bytes: &[u8], i: usize) -> usize {
	const BLOCK: &[u8] = b"\"\"\"";

	if bytes[i..].starts_with(BLOCK) {
		let mut j = i + BLOCK.len();

		while j < bytes.len() {
			if bytes[j..].starts_with(b"\\\"\"\"") {
				j += 4;
			} else if bytes[j..].starts_with(BLOCK) {
				return j + BLOCK.len();
			} else {
				j += 1;
			}
		}

		return bytes.len();
	}

	let mut j = i + 1;

	while let Some(&byte) = bytes.get(j) {
		match byte {
			b'\\' => j += 2,
			b'"' => return j + 1,
			b'\n' => return j,
			_ => j += 1,
		}
	}

	bytes.len()
}

/// JSON body posted to the endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestBody<'a> {
	pub(crate) query: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) operation_name: Option<&'a str>,
	pub(crate) variables: &'a JsonMap<String, JsonValue>,
}
impl<'a> From<&'a Operation> for RequestBody<'a> {
	fn from(operation: &'a Operation) -> Self {
		Self {
			query: &operation.query,
			operation_name: operation.operation_name.as_deref(),
			variables: &operation.variables,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kind_reads_operation_keyword() {
		assert_eq!(
			Operation::new("query Viewer { viewer { login } }").kind(),
			OperationKind::Query
		);
		assert_eq!(Operation::new("{ viewer { login } }").kind(), OperationKind::Query);
		assert_eq!(
			Operation::new(
				"  # add a star\n mutation($id: ID!) { addStar(input: {starrableId: $id}) { id } }"
			)
			.kind(),
			OperationKind::Mutation
		);
		assert_eq!(Operation::new("subscription { ping }").kind(), OperationKind::Subscription);
		assert!(!Operation::new("query mutationLike { a }").is_mutation());
	}

	#[test]
	fn kind_skips_leading_fragments() {
		let star = Operation::new(
			"fragment Repo on Starrable { id }\n\
			 mutation Star { addStar(input: {starrableId: \"R_1\"}) { starrable { ...Repo } } }",
		);

		assert_eq!(star.kind(), OperationKind::Mutation);
		assert_eq!(
			Operation::new("fragment F on User { login } query { viewer { ...F } }").kind(),
			OperationKind::Query
		);
		assert_eq!(Operation::new("fragment F on User { login }").kind(), OperationKind::Query);
	}

	#[test]
	fn kind_follows_operation_name_in_multi_operation_documents() {
		let document = "query Read { viewer { login } } mutation Write { b }";

		assert_eq!(Operation::new(document).kind(), OperationKind::Query);
		assert_eq!(
			Operation::new(document).with_operation_name("Read").kind(),
			OperationKind::Query
		);
		assert_eq!(
			Operation::new(document).with_operation_name("Write").kind(),
			OperationKind::Mutation
		);
		assert_eq!(
			Operation::new(document).with_operation_name("Missing").kind(),
			OperationKind::Query
		);
	}

	#[test]
	fn kind_ignores_braces_in_strings_comments_and_defaults() {
		let cases = [
			"query Q { search(q: \"}\") { a } } mutation M { b }",
			"query Q { a(s: \"\"\" } \\\"\"\" } \"\"\") } mutation M { b }",
			"query Q { a # }\n } mutation M { b }",
			"query Q($f: F = {a: [1, 2]}) @live(if: {x: 1}) { a } mutation M { b }",
		];

		for document in cases {
			assert_eq!(
				Operation::new(document).with_operation_name("M").kind(),
				OperationKind::Mutation,
				"{document}"
			);
		}

		assert_eq!(
			Operation::new("mutation M($i: In = {a: 1}) { b }").kind(),
			OperationKind::Mutation
		);
	}

	#[test]
	fn merge_headers_replaces_matching_names_only() {
		let mut context = OperationContext::default();

		context.headers.insert("x-request-id", HeaderValue::from_static("42"));
		context.headers.insert("authorization", HeaderValue::from_static("token old"));

		let mut patch = HeaderMap::new();

		patch.insert("Authorization", HeaderValue::from_static("bearer new"));
		context.merge_headers(patch);

		assert_eq!(context.headers.len(), 2);
		assert_eq!(context.headers["x-request-id"], "42");
		assert_eq!(context.headers["authorization"], "bearer new");
	}

	#[test]
	fn merge_headers_keeps_multi_valued_patches() {
		let mut context = OperationContext::default();
		let mut patch = HeaderMap::new();

		patch.append("accept", HeaderValue::from_static("application/json"));
		patch.append("accept", HeaderValue::from_static("application/graphql-response+json"));
		context.merge_headers(patch);

		assert_eq!(context.headers.get_all("accept").iter().count(), 2);
	}

	#[test]
	fn with_header_rejects_invalid_names() {
		let err = Operation::new("{ a }")
			.with_header("bad header", "x")
			.expect_err("Spaces are not valid.");

		assert!(matches!(err, ConfigError::InvalidHeaderName { .. }));
	}

	#[test]
	fn request_body_uses_camel_case_and_skips_missing_name() {
		let anonymous = Operation::new("{ a }");
		let body = serde_json::to_value(RequestBody::from(&anonymous))
			.expect("Request body should serialize.");

		assert_eq!(body, serde_json::json!({ "query": "{ a }", "variables": {} }));

		let named = Operation::new("query A($n: Int) { a(n: $n) }")
			.with_operation_name("A")
			.with_variable("n", 3);
		let body = serde_json::to_value(RequestBody::from(&named))
			.expect("Request body should serialize.");

		assert_eq!(body["operationName"], "A");
		assert_eq!(body["variables"]["n"], 3);
	}
}
