use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DataShapeError;

/// One ranked hit from `/search`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
	/// Page title; promotion matches against it.
	pub title: String,
	/// Address of the crawled page.
	pub url: String,
	/// Crawl time, whole seconds since the Unix epoch.
	pub timestamp: i64,
	/// Crawl profile the page was collected under.
	pub profile: String,
}

/// Parse a `/search` response body into raw JSON elements.
///
/// The backend answers `{}` when it fails internally, so anything other than
/// an array is a shape error.
pub fn parse_result_values(body: &str) -> Result<Vec<Value>, DataShapeError> {
	match serde_json::from_str(body).map_err(|e| DataShapeError::Json(e.to_string()))? {
		Value::Array(values) => Ok(values),
		_ => Err(DataShapeError::NotAnArray),
	}
}

/// Decode every element, failing on the first malformed one.
pub fn decode_results(values: Vec<Value>) -> Result<Vec<SearchResult>, DataShapeError> {
	values
		.into_iter()
		.enumerate()
		.map(|(index, value)| {
			serde_json::from_value(value).map_err(|e| DataShapeError::Result {
				index,
				message: e.to_string(),
			})
		})
		.collect()
}
