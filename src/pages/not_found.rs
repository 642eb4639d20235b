use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="container m-5 text-center">
			<h1>"Page not found"</h1>
			<A href="/">"Back to the graph"</A>
		</div>
	}
}
