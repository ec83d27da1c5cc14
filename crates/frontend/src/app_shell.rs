//! Auth gate and the signed-in layout.

use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::Sidebar;
use crate::layout::tabs::registry::OVERVIEW;
use crate::layout::tabs::{TabBar, TabPage};
use crate::layout::Shell;
use crate::shared::modal_stack::use_modals;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;

/// Sidebar plus tabbed pages. Restores `?active=` on mount and always keeps
/// the overview tab open. Tabs and modals do not outlive the session.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    tabs_store.open_view(OVERVIEW);
    tabs_store.init_router_integration();
    let modals = use_modals();
    on_cleanup(move || {
        modals.clear();
        tabs_store.close_all();
    });

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <TabBar />
                    <div class="tabs__content">
                        <For
                            each=move || tabs_store.opened.get()
                            key=|tab| tab.key.clone()
                            children=move |tab: TabData| {
                                view! { <TabPage tab=tab tabs_store=tabs_store /> }
                            }
                        />
                    </div>
                }
                .into_any()
            }
        />
    }
}

/// Spinner while the stored session is checked, then the login page or the
/// main layout.
#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || !auth_state.with(|s| s.restoring)
            fallback=|| view! {
                <div class="app-loading">
                    <Spinner />
                    <span>"Restoring session..."</span>
                </div>
            }
        >
            <Show
                when=move || auth_state.with(|s| s.is_authenticated())
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout />
            </Show>
        </Show>
    }
}
