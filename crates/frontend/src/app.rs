use leptos::prelude::*;

use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthProvider;
use crate::usecases::u501_catalog_checkout::cart::CartStore;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(ModalStackService::new());
    // AuthProvider reports an expired session through toasts.
    provide_context(ToastService::new());
    // The cart outlives the catalog tab.
    provide_context(CartStore::new());

    view! {
        <AuthProvider>
            <AppShell />
            <ModalHost />
        </AuthProvider>
        <ToastHost />
    }
}
