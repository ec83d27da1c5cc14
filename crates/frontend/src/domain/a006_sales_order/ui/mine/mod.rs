use contracts::domain::a006_sales_order::aggregate::{OrderStatus, SalesOrder};
use contracts::shared::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a006_sales_order::api;
use crate::domain::a006_sales_order::ui::details::{ReservationCountdown, SalesOrderDetails};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::confirm::confirm;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::format::format_money;
use crate::shared::list_utils::{ListState, SortHeader};
use crate::shared::modal_stack::{use_modals, ModalSize};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;

/// The client's own orders. Read-only apart from cancelling.
#[component]
pub fn MyOrders() -> impl IntoView {
    let state = RwSignal::new({
        let mut s = ListState::new("createdAt");
        s.sort_ascending = false;
        s
    });
    let items: RwSignal<Vec<SalesOrder>> = RwSignal::new(Vec::new());
    let toast = use_toast();
    let modals = use_modals();

    let load = move || {
        let query = state.with_untracked(ListState::query);
        spawn_local(async move {
            match api::fetch_mine(&query).await {
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

    let open_details = move |id: EntityId| {
        modals.push(ModalSize::Wide, move |handle| {
            view! {
                <SalesOrderDetails
                    id=id
                    client_view=true
                    on_changed=Callback::new(move |_| load())
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let cancel = move |id: EntityId, number: String| {
        if !confirm(&format!("Cancel order {}?", number)) {
            return;
        }
        spawn_local(async move {
            match api::change_status(id, OrderStatus::Canceled).await {
                Ok(_) => {
                    toast.success(format!("Order {} canceled", number));
                    load();
                }
                Err(e) => toast.error(&e),
            }
        });
    };

    view! {
        <PageFrame page_id="my_orders--list" category=PageCategory::List>
            <PageHeader title="My orders" count=Signal::derive(move || state.with(|s| s.total_count))>
                ""
            </PageHeader>

            <div class="page__content">
                <PaginationControls state=state on_change=reload />
                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortHeader state=state field="orderNumber" label="Number" on_sort=reload />
                                <SortHeader state=state field="createdAt" label="Placed" on_sort=reload />
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
                                    let shown_number = o.order_number.clone();
                                    let placed = format_datetime_opt(o.created_at.as_ref());
                                    let status = o.status;
                                    let total = format_money(o.total());
                                    let can_cancel = o.status.client_can_cancel();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <a
                                                    href="#"
                                                    style="color: var(--colorBrandForeground1); font-weight: 500;"
                                                    on:click=move |ev| {
                                                        ev.prevent_default();
                                                        open_details(id);
                                                    }
                                                >
                                                    {shown_number}
                                                </a>
                                            </TableCell>
                                            <TableCell>{placed}</TableCell>
                                            <TableCell>
                                                <StatusBadge status=status />
                                                " "
                                                <ReservationCountdown order=o />
                                            </TableCell>
                                            <TableCell class="table__cell--number">{total}</TableCell>
                                            <TableCell>
                                                <Show when=move || can_cancel>
                                                    <Button
                                                        appearance=ButtonAppearance::Secondary
                                                        size=ButtonSize::Small
                                                        on_click={
                                                            let number = number.clone();
                                                            move |_| cancel(id, number.clone())
                                                        }
                                                    >
                                                        "Cancel"
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
