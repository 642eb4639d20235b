use leptos::prelude::*;

use crate::search::DisplayRecord;

/// One result card.
#[component]
pub fn ResultCard(record: DisplayRecord) -> impl IntoView {
	let DisplayRecord {
		title_text,
		link_text,
		link_href,
		date_text,
		profile_text,
	} = record;

	view! {
		<div class="card my-2 text-start">
			<div class="card-body">
				<h5 class="card-title">{title_text}</h5>
				<a class="card-link" href=link_href target="_blank" rel="noopener noreferrer">
					{link_text}
				</a>
				<p class="card-text">
					<small class="text-muted">{date_text}" · "{profile_text}</small>
				</p>
			</div>
		</div>
	}
}

/// The result list container, rebuilt from scratch whenever `records`
/// changes. Promoted duplicates are rendered twice.
#[component]
pub fn SearchResults(#[prop(into)] records: Signal<Vec<DisplayRecord>>) -> impl IntoView {
	view! {
		<div class="search-results">
			{move || {
				records
					.get()
					.into_iter()
					.map(|record| view! { <ResultCard record=record /> })
					.collect_view()
			}}
		</div>
	}
}
