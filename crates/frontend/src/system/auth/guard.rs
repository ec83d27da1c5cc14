use contracts::system::auth::Role;
use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only for a session holding one of `roles`.
#[component]
pub fn RequireRole(#[prop(into)] roles: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.has_any_role(&roles))
            fallback=|| {
                view! {
                    <div class="access-denied">
                        "You do not have permission to view this page."
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
