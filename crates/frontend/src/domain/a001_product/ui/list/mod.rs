use contracts::domain::a001_product::aggregate::Product;
use contracts::shared::EntityId;
use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_product::api;
use crate::domain::a001_product::ui::details::ProductDetails;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::confirm::confirm;
use crate::shared::format::format_money;
use crate::shared::icons::icon;
use crate::shared::list_utils::{ListState, SearchBar, SortHeader};
use crate::shared::modal_stack::{use_modals, ModalSize};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;

#[component]
pub fn ProductList() -> impl IntoView {
    let state = RwSignal::new(ListState::new("sku"));
    let items: RwSignal<Vec<Product>> = RwSignal::new(Vec::new());
    let loading = RwSignal::new(false);
    let toast = use_toast();
    let modals = use_modals();
    let (auth_state, _) = use_auth();
    let can_edit = Signal::derive(move || auth_state.with(|s| s.has_any_role(&Role::STAFF)));

    let load = move || {
        loading.set(true);
        let query = state.with_untracked(ListState::query);
        spawn_local(async move {
            match api::fetch_page(&query).await {
                Ok(page) => {
                    state.update(|s| s.apply_page(&page));
                    items.set(page.content);
                }
                Err(e) => toast.error(&e),
            }
            loading.set(false);
        });
    };
    let reload = Callback::new(move |_| load());

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load();
        }
    });

    let open_details = move |id: Option<EntityId>| {
        modals.push(ModalSize::Medium, move |handle| {
            view! {
                <ProductDetails
                    id=id
                    on_saved=Callback::new(move |_| {
                        handle.close();
                        load();
                    })
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let remove = move |product: Product| {
        if !confirm(&format!("Delete product {}?", product.sku)) {
            return;
        }
        spawn_local(async move {
            match api::delete(product.id).await {
                Ok(()) => {
                    toast.success(format!("Product {} deleted", product.sku));
                    load();
                }
                Err(e) => toast.error(&e),
            }
        });
    };

    view! {
        <PageFrame page_id="products--list" category=PageCategory::List>
            <PageHeader title="Products" count=Signal::derive(move || state.with(|s| s.total_count))>
                <Show when=move || can_edit.get()>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " New"
                    </Button>
                </Show>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <div class="page__content">
                <SearchBar state=state on_search=reload placeholder="SKU or name..." />
                <PaginationControls state=state on_change=reload />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortHeader state=state field="sku" label="SKU" on_sort=reload />
                                <SortHeader state=state field="name" label="Name" on_sort=reload />
                                <SortHeader state=state field="unitPrice" label="Price" on_sort=reload />
                                <TableHeaderCell>"Unit"</TableHeaderCell>
                                <SortHeader state=state field="active" label="Status" on_sort=reload />
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|p| p.id
                                children=move |product| {
                                    let id = product.id;
                                    let for_delete = product.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{product.sku.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{product.name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_money(product.unit_price)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{product.unit.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if product.active {
                                                        view! { <span class="badge badge--success">"Active"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--neutral">"Archived"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Show when=move || can_edit.get()>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| open_details(Some(id))
                                                        attr:title="Edit"
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click={
                                                            let product = for_delete.clone();
                                                            move |_| remove(product.clone())
                                                        }
                                                        attr:title="Delete"
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                </Show>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}
