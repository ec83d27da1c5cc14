use contracts::domain::a005_purchase_order::aggregate::{
    PurchaseOrder, PurchaseOrderFilter, PurchaseOrderStatus,
};
use contracts::shared::{EntityId, StatusFlow};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a005_purchase_order::api;
use crate::domain::a005_purchase_order::ui::create::PurchaseOrderCreate;
use crate::domain::a005_purchase_order::ui::details::PurchaseOrderDetails;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_badge::{StatusActions, StatusBadge, StatusFilter};
use crate::shared::date_utils::format_date;
use crate::shared::format::format_money;
use crate::shared::icons::icon;
use crate::shared::list_utils::{ListState, SearchBar, SortHeader};
use crate::shared::modal_stack::{use_modals, ModalSize};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;

#[component]
pub fn PurchaseOrderList() -> impl IntoView {
    let state = RwSignal::new({
        let mut s = ListState::new("createdAt");
        s.sort_ascending = false;
        s
    });
    let items: RwSignal<Vec<PurchaseOrder>> = RwSignal::new(Vec::new());
    let status = RwSignal::new(None::<PurchaseOrderStatus>);
    let busy = RwSignal::new(false);
    let toast = use_toast();
    let modals = use_modals();

    let load = move || {
        let query = state.with_untracked(ListState::query);
        let filter = PurchaseOrderFilter {
            status: status.get_untracked(),
            supplier_id: None,
        };
        spawn_local(async move {
            match api::fetch_page(&query, &filter).await {
                Ok(page) => {
                    state.update(|s| s.apply_page(&page));
                    items.set(page.content);
                }
                Err(e) => toast.error(&e),
            }
        });
    };
    let reload = Callback::new(move |_| load());
    load();

    Effect::new(move |prev: Option<()>| {
        status.track();
        if prev.is_some() {
            state.update(|s| s.go_to(0));
            load();
        }
    });

    let open_create = move || {
        modals.push(ModalSize::Wide, move |handle| {
            view! {
                <PurchaseOrderCreate
                    on_created=Callback::new(move |_| {
                        handle.close();
                        load();
                    })
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let open_details = move |id: EntityId| {
        modals.push(ModalSize::Wide, move |handle| {
            view! {
                <PurchaseOrderDetails
                    id=id
                    on_changed=Callback::new(move |_| load())
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let change_status = move |id: EntityId, next: PurchaseOrderStatus| {
        busy.set(true);
        spawn_local(async move {
            match api::change_status(id, next).await {
                Ok(updated) => {
                    toast.success(format!("{} is now {}", updated.order_number, updated.status.label()));
                    load();
                }
                Err(e) => toast.error(&e),
            }
            busy.set(false);
        });
    };

    view! {
        <PageFrame page_id="purchase_orders--list" category=PageCategory::List>
            <PageHeader title="Purchase orders" count=Signal::derive(move || state.with(|s| s.total_count))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_create()>
                    {icon("plus")}
                    " New"
                </Button>
            </PageHeader>

            <div class="page__content">
                <SearchBar state=state on_search=reload placeholder="Order number...">
                    <StatusFilter value=status />
                </SearchBar>
                <PaginationControls state=state on_change=reload />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortHeader state=state field="orderNumber" label="Number" on_sort=reload />
                                <TableHeaderCell>"Supplier"</TableHeaderCell>
                                <TableHeaderCell>"Warehouse"</TableHeaderCell>
                                <SortHeader state=state field="expectedDate" label="Expected" on_sort=reload />
                                <SortHeader state=state field="status" label="Status" on_sort=reload />
                                <TableHeaderCell>"Total"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|o| (o.id, o.status)
                                children=move |o| {
                                    let id = o.id;
                                    let number = o.order_number.clone();
                                    let supplier = o.supplier_name.clone().unwrap_or_else(|| format!("#{}", o.supplier_id));
                                    let warehouse = o.warehouse_name.clone().unwrap_or_else(|| format!("#{}", o.warehouse_id));
                                    let expected = o.expected_date.as_ref().map(format_date).unwrap_or_else(|| "-".to_string());
                                    let status = o.status;
                                    let total = format_money(o.total());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        style="color: var(--colorBrandForeground1); font-weight: 500;"
                                                        on:click=move |ev| {
                                                            ev.prevent_default();
                                                            open_details(id);
                                                        }
                                                    >
                                                        {number}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {supplier}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {warehouse}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                {expected}
                                            </TableCell>
                                            <TableCell>
                                                <StatusBadge status=status />
                                            </TableCell>
                                            <TableCell class="table__cell--number">{total}</TableCell>
                                            <TableCell>
                                                <StatusActions
                                                    status=status
                                                    on_change=Callback::new(move |next| change_status(id, next))
                                                    disabled=Signal::derive(move || busy.get())
                                                />
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
