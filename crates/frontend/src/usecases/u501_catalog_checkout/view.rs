use contracts::domain::a001_product::aggregate::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use super::cart::use_cart;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::format::{format_money, format_thousands};
use crate::shared::icons::icon;
use crate::shared::list_utils::{ListState, SearchBar};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;

/// Client catalog: browse active products, fill the cart, check out.
#[component]
pub fn CatalogCheckout() -> impl IntoView {
    let state = RwSignal::new(ListState::new("name"));
    let products: RwSignal<Vec<Product>> = RwSignal::new(Vec::new());
    let cart = use_cart();
    let checking_out = RwSignal::new(false);
    let toast = use_toast();

    let load = move || {
        let query = state.with_untracked(ListState::query);
        spawn_local(async move {
            match api::fetch_catalog(&query).await {
                Ok(page) => {
                    state.update(|s| s.apply_page(&page));
                    products.set(page.content);
                }
                Err(e) => toast.error(&e),
            }
        });
    };
    let reload = Callback::new(move |_| load());
    load();

    let checkout = move || {
        if cart.with_untracked(|c| c.is_empty()) {
            return;
        }
        checking_out.set(true);
        spawn_local(async move {
            let snapshot = cart.get_untracked();
            match api::checkout(&snapshot).await {
                Ok(order) => {
                    cart.update(|c| c.clear());
                    toast.success(format!("Order {} placed", order.order_number));
                }
                // the cart is kept so the client can fix quantities
                Err(e) => {
                    log::info!("Checkout rejected: {}", e);
                    toast.error(&e);
                }
            }
            checking_out.set(false);
        });
    };

    view! {
        <PageFrame page_id="catalog--usecase" category=PageCategory::Usecase>
            <PageHeader title="Catalog" count=Signal::derive(move || state.with(|s| s.total_count))>
                <span class="cart-summary">
                    {icon("cart")}
                    {move || format!(" {} items", format_thousands(cart.with(|c| c.item_count())))}
                </span>
            </PageHeader>

            <div class="catalog-layout">
                <div class="catalog-layout__products">
                    <SearchBar state=state on_search=reload placeholder="Find a product..." />
                    <div class="catalog-grid">
                        <For
                            each=move || products.get()
                            key=|p| p.id
                            children=move |product| {
                                let id = product.id;
                                let stored = StoredValue::new(product.clone());
                                let in_cart = move || cart.with(|c| c.quantity_of(id));
                                view! {
                                    <div class="catalog-card">
                                        <div class="catalog-card__sku">{product.sku.clone()}</div>
                                        <div class="catalog-card__name">{product.name.clone()}</div>
                                        <div class="catalog-card__description">
                                            {product.description.clone().unwrap_or_default()}
                                        </div>
                                        <div class="catalog-card__footer">
                                            <span class="catalog-card__price">
                                                {format!("{} / {}", format_money(product.unit_price), product.unit)}
                                            </span>
                                            <Button
                                                appearance=ButtonAppearance::Primary
                                                size=ButtonSize::Small
                                                on_click=move |_| stored.with_value(|p| cart.update(|c| c.add(p, 1)))
                                            >
                                                {icon("plus")}
                                                {move || match in_cart() {
                                                    0 => " Add".to_string(),
                                                    n => format!(" Add ({} in cart)", n),
                                                }}
                                            </Button>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                    <PaginationControls state=state on_change=reload />
                </div>

                <aside class="catalog-layout__cart">
                    <h2>"Cart"</h2>
                    <Show
                        when=move || !cart.with(|c| c.is_empty())
                        fallback=|| view! { <p class="text--muted">"Your cart is empty."</p> }
                    >
                        <table class="lines-table">
                            <tbody>
                                <For
                                    each=move || cart.with(|c| c.lines().to_vec())
                                    key=|l| (l.product_id, l.quantity)
                                    children=move |line| {
                                        let id = line.product_id;
                                        let quantity = line.quantity;
                                        view! {
                                            <tr>
                                                <td>
                                                    <div>{line.name.clone()}</div>
                                                    <div class="text--muted">{line.sku.clone()}</div>
                                                </td>
                                                <td class="cart-qty">
                                                    <button
                                                        class="pagination-btn"
                                                        on:click=move |_| cart.update(|c| c.set_quantity(id, quantity - 1))
                                                    >
                                                        {icon("minus")}
                                                    </button>
                                                    <input
                                                        class="form__input form__input--narrow"
                                                        inputmode="numeric"
                                                        prop:value=quantity.to_string()
                                                        on:change=move |ev| {
                                                            if let Ok(q) = event_target_value(&ev).trim().parse::<i64>() {
                                                                cart.update(|c| c.set_quantity(id, q));
                                                            }
                                                        }
                                                    />
                                                    <button
                                                        class="pagination-btn"
                                                        on:click=move |_| cart.update(|c| c.set_quantity(id, quantity + 1))
                                                    >
                                                        {icon("plus")}
                                                    </button>
                                                </td>
                                                <td class="table__cell--number">{format_money(line.amount())}</td>
                                                <td>
                                                    <button class="pagination-btn" on:click=move |_| cart.update(|c| c.remove(id))>
                                                        {icon("x")}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                        <div class="cart-total">
                            <span>"Total"</span>
                            <strong>{move || format_money(cart.with(|c| c.total()))}</strong>
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| checkout()
                            disabled=Signal::derive(move || checking_out.get())
                        >
                            {move || if checking_out.get() { "Placing order..." } else { "Check out" }}
                        </Button>
                    </Show>
                </aside>
            </div>
        </PageFrame>
    }
}
