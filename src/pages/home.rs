use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::error;

use crate::components::error_alert::ErrorAlert;
use crate::components::force_graph::ForceGraphCanvas;
use crate::config::{ClientConfig, SEARCH_PAGE_SEGMENT};
use crate::graph::{GraphLoader, Layout};
use crate::net::{BrowserFetch, RequestSequence};

/// Graph snapshot viewer: fetch `/graph`, lay it out, draw it full screen.
#[component]
pub fn Home() -> impl IntoView {
	let config = StoredValue::new(use_context::<ClientConfig>().unwrap_or_default());
	let layout = RwSignal::new(None::<Layout>);
	let error_slot = RwSignal::new(None::<String>);
	let loading = RwSignal::new(false);
	let sequence = RequestSequence::new();

	let load = move || {
		let token = sequence.issue();
		let sequence = sequence.clone();
		let config = config.get_value();
		loading.set(true);
		spawn_local(async move {
			let loader = GraphLoader::new(BrowserFetch, &config);
			let outcome = loader.load_and_layout(&config.layout).await;
			let Some(outcome) = sequence.accept(token, outcome) else {
				return;
			};
			loading.set(false);
			match outcome {
				Ok(next) => {
					error_slot.set(None);
					layout.set(Some(next));
				}
				Err(err) => {
					error!("graph load failed: {err}");
					// never draw half of a bad payload
					layout.set(None);
					error_slot.set(Some(format!("Could not load graph: {err}")));
				}
			}
		});
	};
	load();

	let summary = move || {
		layout.with(|l| match l {
			Some(l) => format!("{} nodes · {} edges", l.nodes.len(), l.edges.len()),
			None => String::new(),
		})
	};
	let layout_config = Signal::derive(move || config.with_value(|c| c.layout.clone()));

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas layout=layout config=layout_config fullscreen=true />
			<div class="graph-overlay">
				<h1>"Crawl Graph"</h1>
				<p class="subtitle">
					"Drag nodes to reposition. Scroll to zoom. Drag background to pan. Double-click to refit."
				</p>
				<p class="subtitle">{summary}</p>
				<Show when=move || loading.get()>
					<p class="subtitle">"Laying out graph…"</p>
				</Show>
				<ErrorAlert message=error_slot />
				<button class="btn btn-secondary btn-sm m-1" on:click=move |_| load()>
					"Reload"
				</button>
				<A href=format!("/{SEARCH_PAGE_SEGMENT}")>"Search"</A>
			</div>
		</div>
	}
}
