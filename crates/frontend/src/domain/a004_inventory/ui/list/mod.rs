use contracts::domain::a002_warehouse::aggregate::Warehouse;
use contracts::domain::a004_inventory::aggregate::{Inventory, InventoryFilter};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_warehouse::api as warehouse_api;
use crate::domain::a004_inventory::api;
use crate::domain::a004_inventory::ui::adjust::AdjustStock;
use crate::shared::components::entity_select::EntitySelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::app_config;
use crate::shared::format::format_thousands;
use crate::shared::icons::icon;
use crate::shared::list_utils::{ListState, SearchBar, SortHeader};
use crate::shared::modal_stack::{use_modals, ModalSize};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::ticker::every;
use crate::shared::toast::use_toast;

/// Stock levels per warehouse. Reservations change on the server while the
/// page is open, so the table re-fetches on a timer.
#[component]
pub fn InventoryList() -> impl IntoView {
    let state = RwSignal::new(ListState::new("productSku"));
    let items: RwSignal<Vec<Inventory>> = RwSignal::new(Vec::new());
    let warehouses: RwSignal<Vec<Warehouse>> = RwSignal::new(Vec::new());
    let warehouse_id = RwSignal::new(None);
    let low_stock_only = RwSignal::new(false);
    let last_error = RwSignal::new(false);
    let toast = use_toast();
    let modals = use_modals();

    let load = move |quiet: bool| {
        let query = state.with_untracked(ListState::query);
        let filter = InventoryFilter {
            warehouse_id: warehouse_id.get_untracked(),
            low_stock_only: low_stock_only.get_untracked(),
        };
        spawn_local(async move {
            match api::fetch_page(&query, &filter).await {
                Ok(page) => {
                    state.update(|s| s.apply_page(&page));
                    items.set(page.content);
                    last_error.set(false);
                }
                Err(e) => {
                    // a failing poll reports once, not every tick
                    if !quiet || !last_error.get_untracked() {
                        toast.error(&e);
                    }
                    last_error.set(true);
                }
            }
        });
    };
    let reload = Callback::new(move |_| load(false));
    load(false);

    spawn_local(async move {
        match warehouse_api::fetch_options().await {
            Ok(list) => warehouses.set(list),
            Err(e) => log::warn!("Failed to load warehouses: {}", e),
        }
    });

    every(app_config().ui.inventory_poll_ms, move || load(true));

    Effect::new(move |prev: Option<()>| {
        warehouse_id.track();
        low_stock_only.track();
        if prev.is_some() {
            state.update(|s| s.go_to(0));
            load(false);
        }
    });

    let open_adjust = move |row: Inventory| {
        modals.push(ModalSize::Small, move |handle| {
            view! {
                <AdjustStock
                    row=row.clone()
                    on_done=Callback::new(move |_| {
                        handle.close();
                        load(false);
                    })
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    view! {
        <PageFrame page_id="inventory--list" category=PageCategory::List>
            <PageHeader title="Inventory" count=Signal::derive(move || state.with(|s| s.total_count))>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load(false)>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <div class="page__content">
                <SearchBar state=state on_search=reload placeholder="SKU or product...">
                    <div style="width: 220px;">
                        <EntitySelect items=warehouses value=warehouse_id placeholder="All warehouses" />
                    </div>
                    <label class="form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || low_stock_only.get()
                            on:change=move |ev| low_stock_only.set(event_target_checked(&ev))
                        />
                        " Low stock only"
                    </label>
                </SearchBar>
                <PaginationControls state=state on_change=reload />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortHeader state=state field="productSku" label="SKU" on_sort=reload />
                                <SortHeader state=state field="productName" label="Product" on_sort=reload />
                                <SortHeader state=state field="warehouseName" label="Warehouse" on_sort=reload />
                                <SortHeader state=state field="onHand" label="On hand" on_sort=reload />
                                <SortHeader state=state field="reserved" label="Reserved" on_sort=reload />
                                <TableHeaderCell>"Available"</TableHeaderCell>
                                <SortHeader state=state field="reorderLevel" label="Reorder at" on_sort=reload />
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|row| (row.id, row.on_hand, row.reserved)
                                children=move |row| {
                                    let low = row.is_low_stock();
                                    let sku = row.product_sku.clone();
                                    let product = row.product_name.clone();
                                    let warehouse = row.warehouse_name.clone();
                                    let (on_hand, reserved, available, reorder_level) =
                                        (row.on_hand, row.reserved, row.available(), row.reorder_level);
                                    let for_adjust = row;
                                    view! {
                                        <TableRow class=if low { "table__row--warning" } else { "" }>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-weight: 500;">{sku}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{product}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{warehouse}</TableCellLayout>
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                {format_thousands(on_hand)}
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                {format_thousands(reserved)}
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                <span class:text--warning=low>{format_thousands(available)}</span>
                                                {low.then(|| view! { <span class="badge badge--warning">"Low"</span> })}
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                {format_thousands(reorder_level)}
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    size=ButtonSize::Small
                                                    on_click=move |_| open_adjust(for_adjust.clone())
                                                >
                                                    {icon("edit")}
                                                    " Adjust"
                                                </Button>
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
