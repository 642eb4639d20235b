use log::debug;

use super::{GraphPayload, Layout, LayoutConfig, LayoutEngine};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::net::Fetch;

/// Fetches the graph snapshot and hands it to the layout engine.
pub struct GraphLoader<F> {
	fetch: F,
	url: String,
}

impl<F: Fetch> GraphLoader<F> {
	/// Loader for `config`'s graph endpoint.
	pub fn new(fetch: F, config: &ClientConfig) -> Self {
		Self {
			fetch,
			url: config.graph_url(),
		}
	}

	/// Fetch, decode and integrity-check one payload.
	pub async fn load(&self) -> Result<GraphPayload, ClientError> {
		debug!("fetching graph from {}", self.url);
		let body = self.fetch.get_text(&self.url).await?;
		let payload = GraphPayload::from_json(&body)?;
		payload.validate()?;
		debug!(
			"graph payload: {} nodes, {} edges",
			payload.nodes.len(),
			payload.edges.len()
		);
		Ok(payload)
	}

	/// [`Self::load`] followed by a full layout run.
	pub async fn load_and_layout(&self, config: &LayoutConfig) -> Result<Layout, ClientError> {
		let payload = self.load().await?;
		Ok(LayoutEngine::new(config.clone()).run(&payload)?)
	}
}
