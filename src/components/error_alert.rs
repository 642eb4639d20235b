use leptos::prelude::*;

/// The single user-visible error slot of a page. Renders nothing while empty.
#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
	move || {
		message.get().map(|message| {
			view! {
				<div class="alert alert-danger" role="alert">
					{message}
				</div>
			}
		})
	}
}
