use leptos::ev;
use leptos::prelude::*;

use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::registry::OVERVIEW;
use crate::shared::icons::icon;

#[component]
fn TabHeader(tab: TabData) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let key = StoredValue::new(tab.key.clone());
    let is_active = Memo::new(move |_| {
        tabs_store
            .active
            .with(|active| active.as_deref() == Some(key.get_value().as_str()))
    });
    let closable = tab.key != OVERVIEW;

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key.get_value());
    };

    view! {
        <div
            class="tab-bar__tab"
            class:tab-bar__tab--active=is_active
            on:click=move |_| tabs_store.activate_tab(&key.get_value())
        >
            <span>{tab.title}</span>
            {closable.then(|| view! {
                <button class="tab-bar__close" title="Close" on:click=on_close>
                    {icon("x")}
                </button>
            })}
        </div>
    }
}

/// Headers of the opened tabs. The overview tab cannot be closed.
#[component]
pub fn TabBar() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="tab-bar">
            <For
                each=move || tabs_store.opened.get()
                key=|tab| tab.key.clone()
                children=move |tab| view! { <TabHeader tab=tab /> }
            />
        </div>
    }
}
