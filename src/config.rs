//! Client configuration, provided to the component tree as context.

use crate::graph::LayoutConfig;
use crate::search::PromotionMode;

/// Base URL prepended to every endpoint. Empty means same origin.
///
/// Overridable at build time with `CRAWLVIEW_API_BASE`.
pub const DEFAULT_API_BASE: &str = match option_env!("CRAWLVIEW_API_BASE") {
	Some(base) => base,
	None => "",
};

/// Path segment the search page is routed at.
///
/// Kept distinct from the search API path so a reload on the page is served
/// by the app rather than the backend.
pub const SEARCH_PAGE_SEGMENT: &str = "find";

/// Endpoints and algorithm knobs for both pipelines.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
	/// Scheme, host and optional prefix; empty for same origin.
	pub api_base: String,
	/// Graph snapshot endpoint, relative to `api_base`.
	pub graph_path: String,
	/// Search endpoint, relative to `api_base`.
	pub search_path: String,
	/// How the best title match is lifted to the top.
	pub promotion: PromotionMode,
	/// Options for every graph layout run.
	pub layout: LayoutConfig,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			api_base: DEFAULT_API_BASE.to_string(),
			graph_path: "/graph".into(),
			search_path: "/search".into(),
			promotion: PromotionMode::default(),
			layout: LayoutConfig::default(),
		}
	}
}

impl ClientConfig {
	/// Absolute (or origin-relative) URL of the graph snapshot.
	pub fn graph_url(&self) -> String {
		join(&self.api_base, &self.graph_path)
	}

	/// URL of a search request; the query is form-encoded as-is.
	pub fn search_url(&self, query: &str) -> String {
		let params = url::form_urlencoded::Serializer::new(String::new())
			.append_pair("search", query)
			.finish();
		format!("{}?{}", join(&self.api_base, &self.search_path), params)
	}
}

fn join(base: &str, path: &str) -> String {
	format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn urls_join_without_double_slashes() {
		let config = ClientConfig {
			api_base: "http://localhost:8000/".into(),
			..ClientConfig::default()
		};
		assert_eq!(config.graph_url(), "http://localhost:8000/graph");
	}

	#[test]
	fn search_query_is_form_encoded() {
		let config = ClientConfig {
			api_base: String::new(),
			..ClientConfig::default()
		};
		assert_eq!(config.search_url("great cats&dogs"), "/search?search=great+cats%26dogs");
	}

	#[test]
	fn search_page_does_not_shadow_the_search_api() {
		let config = ClientConfig::default();
		let page = format!("/{SEARCH_PAGE_SEGMENT}");
		assert_ne!(page, config.search_path);
		assert_ne!(page, config.graph_path);
		assert!(!config.search_url("cats").starts_with(&format!("{page}?")));
	}
}
