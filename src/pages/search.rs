use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::error;

use crate::components::error_alert::ErrorAlert;
use crate::components::search_results::SearchResults;
use crate::config::ClientConfig;
use crate::net::{BrowserFetch, RequestSequence};
use crate::search::{DisplayRecord, SearchClient, display_records};

/// Search box plus result list.
#[component]
pub fn SearchPage() -> impl IntoView {
	let config = StoredValue::new(use_context::<ClientConfig>().unwrap_or_default());
	let query = RwSignal::new(String::new());
	let records = RwSignal::new(Vec::<DisplayRecord>::new());
	let error_slot = RwSignal::new(None::<String>);
	let sequence = RequestSequence::new();

	// The query arrives as an argument; nothing reads the input element directly.
	let run_search = move |query: String| {
		let token = sequence.issue();
		let sequence = sequence.clone();
		let client = SearchClient::new(BrowserFetch, config.get_value());
		spawn_local(async move {
			let Some(outcome) = sequence.accept(token, client.search(&query).await) else {
				return;
			};
			match outcome {
				Ok(results) => {
					error_slot.set(None);
					records.set(display_records(&results));
				}
				Err(err) => {
					error!("search for {query:?} failed: {err}");
					records.set(Vec::new());
					error_slot.set(Some(format!("Search failed: {err}")));
				}
			}
		});
	};

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		run_search(query.get_untracked());
	};

	view! {
		<div class="container m-5 w-50 mx-auto text-center border p-5">
			<h1>"Search Engine 🔍"</h1>
			<ErrorAlert message=error_slot />
			<hr />
			<form class="d-flex p-2" on:submit=on_submit>
				<input
					type="text"
					class="form-control m-1"
					placeholder="Keywords here"
					bind:value=query
				/>
				<button type="submit" class="btn btn-info m-1">
					"Search"
				</button>
			</form>
			<SearchResults records=records />
			<A href="/">"Graph"</A>
		</div>
	}
}
