//! Leptos client for crawl graph snapshots and the crawl search engine.
//!
//! The algorithmic pieces (`graph::LayoutEngine`, `search::promote`) are
//! plain Rust and testable off the browser; `components` and `pages` are the
//! WASM view layer on top.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::{StaticSegment, path};
use log::{Level, info};

pub mod config;
pub mod error;
pub mod graph;
pub mod net;
pub mod search;

// View layer
mod components;
mod pages;

use crate::config::{ClientConfig, SEARCH_PAGE_SEGMENT};
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::search::SearchPage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router with the graph viewer at `/` and search at `/find`.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(ClientConfig::default());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Crawl View" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=StaticSegment(SEARCH_PAGE_SEGMENT) view=SearchPage />
			</Routes>
		</Router>
	}
}
