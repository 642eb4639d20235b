use log::debug;

use super::{PromotionMode, SearchResult, parse_result_values, promote_json};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::net::Fetch;

/// Runs a query against `/search` and applies result promotion.
pub struct SearchClient<F> {
	fetch: F,
	config: ClientConfig,
}

impl<F: Fetch> SearchClient<F> {
	/// Client over `fetch`, using `config`'s endpoint and promotion mode.
	pub fn new(fetch: F, config: ClientConfig) -> Self {
		Self { fetch, config }
	}

	/// Promotion mode applied to every result list.
	pub fn promotion(&self) -> PromotionMode {
		self.config.promotion
	}

	/// Lower-case `query`, fetch, decode, promote. A blank query returns no
	/// results without issuing a request.
	pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError> {
		if query.trim().is_empty() {
			return Ok(Vec::new());
		}

		let query = query.to_lowercase();
		let url = self.config.search_url(&query);
		debug!("searching {url}");
		let body = self.fetch.get_text(&url).await?;
		let values = parse_result_values(&body)?;
		let results = promote_json(values, &query, self.config.promotion)?;
		debug!("{} results for {query:?}", results.len());
		Ok(results)
	}
}
