use leptos::prelude::*;

use crate::shared::icons::icon;
use crate::shared::list_utils::ListState;

const PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

/// First/previous/next/last plus a page size picker. `on_change` reloads.
#[component]
pub fn PaginationControls(state: RwSignal<ListState>, on_change: Callback<()>) -> impl IntoView {
    let go = move |page: u32| {
        state.update(|s| s.go_to(page));
        on_change.run(());
    };
    let at_start = move || state.with(|s| s.page == 0);
    let at_end = move || state.with(|s| s.page + 1 >= s.total_pages);

    view! {
        <div class="pagination-controls">
            <button class="pagination-btn" title="First page" disabled=at_start on:click=move |_| go(0)>
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                title="Previous page"
                disabled=at_start
                on:click=move |_| go(state.with_untracked(|s| s.page.saturating_sub(1)))
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || state.with(|s| format!("{} / {} ({})", s.page + 1, s.total_pages.max(1), s.total_count))}
            </span>
            <button
                class="pagination-btn"
                title="Next page"
                disabled=at_end
                on:click=move |_| go(state.with_untracked(|s| s.page + 1))
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                title="Last page"
                disabled=at_end
                on:click=move |_| go(state.with_untracked(|s| s.total_pages.saturating_sub(1)))
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                prop:value=move || state.with(|s| s.page_size.to_string())
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        state.update(|s| s.set_page_size(size));
                        on_change.run(());
                    }
                }
            >
                {PAGE_SIZES
                    .iter()
                    .map(|size| view! { <option value=size.to_string()>{size.to_string()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
