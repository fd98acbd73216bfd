use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring the graph into the page.
#[derive(Debug, Error)]
pub enum GraphError {
	/// `window` or `document` is unavailable.
	#[error("no browser window")]
	NoWindow,

	/// The canvas node ref is empty.
	#[error("canvas element is not mounted")]
	CanvasMissing,

	/// `getContext("2d")` returned nothing usable.
	#[error("canvas has no 2d context")]
	NoContext,

	/// No element with this id, or not a `<script>`.
	#[error("element #{0} not found")]
	MissingElement(String),

	/// Embedded JSON did not parse.
	#[error("invalid graph data: {0}")]
	Data(#[from] serde_json::Error),

	/// Exception thrown by a browser API.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for GraphError {
	fn from(value: JsValue) -> Self {
		GraphError::Js(
			value
				.as_string()
				.unwrap_or_else(|| format!("{value:?}")),
		)
	}
}
