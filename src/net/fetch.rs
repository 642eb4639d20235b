use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::TransportError;

/// Fetches a URL and yields the response body as text.
///
/// Futures are polled on the browser event loop
/// and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Fetch {
	/// GET `url`; a non-2xx status is a [`TransportError::Status`].
	async fn get_text(&self, url: &str) -> Result<String, TransportError>;
}

impl<F: Fetch> Fetch for &F {
	async fn get_text(&self, url: &str) -> Result<String, TransportError> {
		(**self).get_text(url).await
	}
}

/// `window.fetch` via `web-sys`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserFetch;

impl Fetch for BrowserFetch {
	async fn get_text(&self, url: &str) -> Result<String, TransportError> {
		let network = |reason: String| TransportError::Network {
			url: url.to_string(),
			reason,
		};

		let window = web_sys::window().ok_or_else(|| network("no window".into()))?;
		let response = JsFuture::from(window.fetch_with_str(url))
			.await
			.map_err(|e| network(describe(&e)))?;
		let response: Response = response
			.dyn_into()
			.map_err(|_| network("fetch did not yield a Response".into()))?;

		if !response.ok() {
			return Err(TransportError::Status {
				url: url.to_string(),
				status: response.status(),
			});
		}

		let text = response.text().map_err(|e| network(describe(&e)))?;
		let text = JsFuture::from(text).await.map_err(|e| network(describe(&e)))?;
		text.as_string()
			.ok_or_else(|| network("response body is not text".into()))
	}
}

fn describe(value: &wasm_bindgen::JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
