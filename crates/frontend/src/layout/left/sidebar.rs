//! Navigation menu. Groups and items come from the view registry and are
//! filtered by the roles of the signed-in user.

use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::registry::{visible_in, MenuGroup, ViewEntry};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[component]
fn SidebarItem(entry: &'static ViewEntry) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div
            class="app-sidebar__item"
            class:app-sidebar__item--active=move || {
                ctx.active.with(|a| a.as_deref() == Some(entry.key))
            }
            on:click=move |_| ctx.open_view(entry.key)
        >
            <div class="app-sidebar__item-content">
                {icon(entry.icon)}
                <span>{entry.label}</span>
            </div>
        </div>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let collapsed = RwSignal::new(Vec::<MenuGroup>::new());

    let groups = move || {
        let roles = auth_state.with(|s| s.roles());
        MenuGroup::ORDER
            .into_iter()
            .map(|group| (group, visible_in(group, &roles)))
            .filter(|(_, items)| !items.is_empty())
            .collect::<Vec<_>>()
    };

    view! {
        <div class="app-sidebar__content">
            {move || {
                groups()
                    .into_iter()
                    .map(|(group, items)| {
                        let is_open = move || !collapsed.with(|c| c.contains(&group));
                        view! {
                            <div class="app-sidebar__group">
                                <div
                                    class="app-sidebar__group-title"
                                    on:click=move |_| {
                                        collapsed.update(|c| {
                                            if let Some(pos) = c.iter().position(|g| *g == group) {
                                                c.remove(pos);
                                            } else {
                                                c.push(group);
                                            }
                                        })
                                    }
                                >
                                    <span>{group.label()}</span>
                                    <div
                                        class="app-sidebar__chevron"
                                        class:app-sidebar__chevron--expanded=is_open
                                    >
                                        {icon("chevron-right")}
                                    </div>
                                </div>
                                <Show when=is_open>
                                    <div class="app-sidebar__children">
                                        {items
                                            .iter()
                                            .map(|entry| view! { <SidebarItem entry=*entry /> })
                                            .collect_view()}
                                    </div>
                                </Show>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
