//! Modal character detail overlay opened by clicking a node.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use super::types::Character;

const PERSON_ICON: &str = "M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z";
const CLOSE_ICON: &str = "M6 18L18 6M6 6l12 12";

/// Calendar date in `ja-JP` short form, e.g. `2024/3/9`. Missing dates show `-`.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
	date.map_or_else(|| "-".to_string(), |d| d.format("%Y/%-m/%-d").to_string())
}

/// Photo with a fallback to the person icon when missing or broken.
#[component]
fn CharacterAvatar(photo: Option<String>, name: String) -> impl IntoView {
	let failed = RwSignal::new(false);
	let photo = photo.filter(|url| !url.trim().is_empty());

	view! {
		{move || match photo.clone().filter(|_| !failed.get()) {
			Some(src) => view! {
				<img
					src=src
					alt=name.clone()
					class="w-20 h-20 rounded-full object-cover border-2 border-gray-200"
					on:error=move |_| failed.set(true)
				/>
			}
			.into_any(),
			None => view! {
				<div class="w-20 h-20 rounded-full bg-gray-200 flex items-center justify-center border-2 border-gray-200">
					<svg class="w-8 h-8 text-gray-400" fill="none" viewBox="0 0 24 24" stroke="currentColor">
						<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=PERSON_ICON />
					</svg>
				</div>
			}
			.into_any(),
		}}
	}
}

/// Detail overlay for the selected character.
///
/// Rendered above the graph with a full-viewport backdrop, so the canvas
/// receives no pointer input while it is open. Closed through the close
/// button or a click on the backdrop.
#[component]
pub fn CharacterDetailModal(
	/// Character to show; `None` hides the modal.
	#[prop(into)]
	character: Signal<Option<Character>>,
	/// Invoked by the close button and the backdrop.
	on_close: Callback<()>,
) -> impl IntoView {
	view! {
		{move || {
			character.get().map(|c| {
				let labels = c
					.labels
					.iter()
					.map(|label| {
						view! {
							<span
								class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium text-white"
								style=format!("background-color: {}", label.color)
							>
								{label.name.clone()}
							</span>
						}
					})
					.collect_view();
				let links = c
					.related_links
					.iter()
					.map(|link| {
						view! {
							<a
								href=link.clone()
								target="_blank"
								rel="noopener noreferrer"
								class="block text-sm text-blue-600 hover:text-blue-800 hover:underline break-all"
							>
								{link.clone()}
							</a>
						}
					})
					.collect_view();
				let has_labels = !c.labels.is_empty();
				let has_links = !c.related_links.is_empty();
				let information = (!c.information.trim().is_empty()).then(|| c.information.clone());

				view! {
					<div
						class="character-detail-backdrop fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center"
						style="position: fixed; inset: 0; z-index: 40;"
						on:click=move |_| on_close.run(())
					>
						<div
							class="character-detail bg-white rounded-lg shadow-xl max-w-2xl w-full p-6"
							role="dialog"
							aria-modal="true"
							on:click=|ev| ev.stop_propagation()
						>
							<div class="flex items-start space-x-4">
								<div class="flex-shrink-0">
									<CharacterAvatar photo=c.photo.clone() name=c.name.clone() />
								</div>
								<div class="flex-1 min-w-0">
									<div class="flex items-center justify-between">
										<h2 class="text-xl font-bold text-gray-900 truncate">{c.name.clone()}</h2>
										<button
											class="ml-4 text-gray-400 hover:text-gray-600 focus:outline-none"
											aria-label="閉じる"
											on:click=move |_| on_close.run(())
										>
											<svg class="w-6 h-6" fill="none" viewBox="0 0 24 24" stroke="currentColor">
												<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=CLOSE_ICON />
											</svg>
										</button>
									</div>
									{has_labels.then(|| view! {
										<div class="mt-2 flex flex-wrap gap-2">{labels}</div>
									})}
									{information.map(|info| view! {
										<div class="mt-4">
											<h3 class="text-sm font-medium text-gray-900 mb-2">"詳細情報"</h3>
											<div class="text-sm text-gray-700 whitespace-pre-wrap bg-gray-50 p-3 rounded-md">
												{info}
											</div>
										</div>
									})}
									{has_links.then(|| view! {
										<div class="mt-4">
											<h3 class="text-sm font-medium text-gray-900 mb-2">"関連リンク"</h3>
											<div class="space-y-1">{links}</div>
										</div>
									})}
									<div class="mt-4 pt-4 border-t border-gray-200">
										<div class="flex justify-between text-xs text-gray-500">
											<span>"作成日: " {format_date(c.created_at)}</span>
											<span>"更新日: " {format_date(c.updated_at)}</span>
										</div>
									</div>
								</div>
							</div>
						</div>
					</div>
				}
			})
		}}
	}
}
