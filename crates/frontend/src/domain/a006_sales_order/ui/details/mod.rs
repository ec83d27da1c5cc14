use chrono::Utc;
use contracts::domain::a006_sales_order::aggregate::{format_remaining, OrderStatus, SalesOrder};
use contracts::shared::{EntityId, StatusFlow};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a006_sales_order::api;
use crate::shared::components::status_badge::{StatusActions, StatusBadge};
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::format::{format_money, format_thousands};
use crate::shared::icons::icon;
use crate::shared::ticker::every;
use crate::shared::toast::use_toast;

/// Live "expires in" text while the order holds a reservation. The backend
/// releases the stock on its own; this only shows the clock.
#[component]
pub fn ReservationCountdown(order: SalesOrder) -> impl IntoView {
    let now = RwSignal::new(Utc::now());
    if order.reservation_remaining(Utc::now()).is_some() {
        every(1000, move || now.set(Utc::now()));
    }
    move || {
        order
            .reservation_remaining(now.get())
            .map(|left| {
                let expired = left.num_seconds() <= 0;
                view! {
                    <span class=if expired { "countdown countdown--expired" } else { "countdown" }>
                        {if expired {
                            "Reservation expired".to_string()
                        } else {
                            format!("Reserved, expires in {}", format_remaining(left))
                        }}
                    </span>
                }
            })
    }
}

#[component]
pub fn SalesOrderLines(order: SalesOrder) -> impl IntoView {
    let total = order.total();
    view! {
        <table class="lines-table">
            <thead>
                <tr>
                    <th>"Product"</th>
                    <th>"Qty"</th>
                    <th>"Price"</th>
                    <th>"Amount"</th>
                </tr>
            </thead>
            <tbody>
                {order
                    .lines
                    .into_iter()
                    .map(|l| {
                        let product = l
                            .product_name
                            .clone()
                            .or_else(|| l.product_sku.clone())
                            .unwrap_or_else(|| format!("#{}", l.product_id));
                        view! {
                            <tr>
                                <td>{product}</td>
                                <td class="table__cell--number">{format_thousands(l.quantity)}</td>
                                <td class="table__cell--number">{format_money(l.unit_price)}</td>
                                <td class="table__cell--number">{format_money(l.amount())}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
            <tfoot>
                <tr>
                    <td colspan="3">"Total"</td>
                    <td class="table__cell--number">{format_money(total)}</td>
                </tr>
            </tfoot>
        </table>
    }
}

/// Order details. Staff get the status actions; clients only a cancel
/// button while the order has not left the warehouse.
#[component]
pub fn SalesOrderDetails(
    id: EntityId,
    #[prop(optional)] client_view: bool,
    on_changed: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let order = RwSignal::new(None::<SalesOrder>);
    let busy = RwSignal::new(true);
    let toast = use_toast();

    spawn_local(async move {
        match api::fetch_by_id(id).await {
            Ok(o) => order.set(Some(o)),
            Err(e) => toast.error(&e),
        }
        busy.set(false);
    });

    let change_status = Callback::new(move |status: OrderStatus| {
        busy.set(true);
        spawn_local(async move {
            match api::change_status(id, status).await {
                Ok(updated) => {
                    toast.success(format!("{} is now {}", updated.order_number, updated.status.label()));
                    order.set(Some(updated));
                    on_changed.run(());
                }
                Err(e) => toast.error(&e),
            }
            busy.set(false);
        });
    });

    view! {
        <div class="modal-header">
            <h2 class="modal-title">
                {move || order.with(|o| o.as_ref().map(|o| format!("Order {}", o.order_number)))}
            </h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>
        <div class="modal-body">
            {move || match order.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(o) => {
                    let customer = o.customer_name.clone().unwrap_or_else(|| format!("#{}", o.customer_id));
                    view! {
                        <dl class="details-grid">
                            <dt>"Status"</dt>
                            <dd>
                                <StatusBadge status=o.status />
                                " "
                                <ReservationCountdown order=o.clone() />
                            </dd>
                            <dt>"Customer"</dt>
                            <dd>{customer}</dd>
                            <dt>"Warehouse"</dt>
                            <dd>{o.warehouse_name.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Created"</dt>
                            <dd>{format_datetime_opt(o.created_at.as_ref())}</dd>
                        </dl>
                        <SalesOrderLines order=o />
                    }
                    .into_any()
                }
            }}
        </div>
        <div class="modal-footer">
            {move || {
                order
                    .get()
                    .map(|o| {
                        if !client_view {
                            view! {
                                <StatusActions
                                    status=o.status
                                    on_change=change_status
                                    disabled=Signal::derive(move || busy.get())
                                />
                            }
                            .into_any()
                        } else if o.status.client_can_cancel() {
                            view! {
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    disabled=Signal::derive(move || busy.get())
                                    on_click=move |_| change_status.run(OrderStatus::Canceled)
                                >
                                    "Cancel order"
                                </Button>
                            }
                            .into_any()
                        } else {
                            ().into_any()
                        }
                    })
            }}
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                "Close"
            </Button>
        </div>
    }
}
