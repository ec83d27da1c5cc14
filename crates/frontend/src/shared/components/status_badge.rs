use contracts::shared::StatusFlow;
use leptos::prelude::*;

/// Colored pill for an order or shipment status.
#[component]
pub fn StatusBadge<S: StatusFlow + Send + Sync>(status: S) -> impl IntoView {
    let modifier = if status.is_terminal() {
        "badge--neutral"
    } else {
        "badge--warning"
    };
    view! { <span class=format!("badge {}", modifier)>{status.label()}</span> }
}

/// A button per allowed next status.
#[component]
pub fn StatusActions<S: StatusFlow + Send + Sync>(
    status: S,
    on_change: Callback<S>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    status
        .next_states()
        .iter()
        .map(|next| {
            let next = *next;
            view! {
                <thaw::Button
                    appearance=thaw::ButtonAppearance::Secondary
                    size=thaw::ButtonSize::Small
                    disabled=disabled
                    on_click=move |_| on_change.run(next)
                >
                    {next.action_label()}
                </thaw::Button>
            }
        })
        .collect_view()
}

/// "All statuses" plus one option per status, for list filters.
#[component]
pub fn StatusFilter<S: StatusFlow + Send + Sync>(value: RwSignal<Option<S>>) -> impl IntoView {
    view! {
        <select
            class="form__select"
            prop:value=move || value.get().map(|s| s.code()).unwrap_or_default()
            on:change=move |ev| value.set(S::from_code(&event_target_value(&ev)))
        >
            <option value="">"All statuses"</option>
            {S::all()
                .iter()
                .map(|s| view! { <option value=s.code()>{s.label()}</option> })
                .collect_view()}
        </select>
    }
}
