use contracts::shared::EntityId;
use leptos::prelude::*;

/// Something a form can pick by id.
pub trait SelectOption {
    fn option_id(&self) -> EntityId;
    fn option_label(&self) -> String;
}

/// Native `<select>` over a loaded reference list.
#[component]
pub fn EntitySelect<T>(
    #[prop(into)] items: Signal<Vec<T>>,
    value: RwSignal<Option<EntityId>>,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView
where
    T: SelectOption + Clone + Send + Sync + 'static,
{
    let placeholder = if placeholder.is_empty() { "Select..." } else { placeholder };

    view! {
        <select
            class="form__select"
            disabled=move || disabled.get()
            prop:value=move || value.get().map(|id| id.to_string()).unwrap_or_default()
            on:change=move |ev| value.set(event_target_value(&ev).parse::<EntityId>().ok())
        >
            <option value="">{placeholder}</option>
            {move || {
                items
                    .get()
                    .into_iter()
                    .map(|item| {
                        let id = item.option_id();
                        view! {
                            <option value=id.to_string() selected=move || value.get() == Some(id)>
                                {item.option_label()}
                            </option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
}
