use contracts::domain::a005_purchase_order::aggregate::{PurchaseOrder, PurchaseOrderStatus};
use contracts::shared::{EntityId, StatusFlow};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a005_purchase_order::api;
use crate::shared::components::status_badge::{StatusActions, StatusBadge};
use crate::shared::date_utils::{format_date, format_datetime_opt};
use crate::shared::format::{format_money, format_thousands};
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

/// Read-only view of one order with its status actions.
#[component]
pub fn PurchaseOrderDetails(
    id: EntityId,
    on_changed: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let order = RwSignal::new(None::<PurchaseOrder>);
    let busy = RwSignal::new(true);
    let toast = use_toast();

    spawn_local(async move {
        match api::fetch_by_id(id).await {
            Ok(o) => order.set(Some(o)),
            Err(e) => toast.error(&e),
        }
        busy.set(false);
    });

    let change_status = Callback::new(move |status: PurchaseOrderStatus| {
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
                {move || order.with(|o| o.as_ref().map(|o| format!("Purchase order {}", o.order_number)))}
            </h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>
        <div class="modal-body">
            <Show when=move || order.with(Option::is_some) fallback=|| view! { <Spinner /> }>
                {move || {
                    order
                        .get()
                        .map(|o| {
                            view! {
                                <dl class="details-grid">
                                    <dt>"Status"</dt>
                                    <dd><StatusBadge status=o.status /></dd>
                                    <dt>"Supplier"</dt>
                                    <dd>{o.supplier_name.clone().unwrap_or_else(|| format!("#{}", o.supplier_id))}</dd>
                                    <dt>"Warehouse"</dt>
                                    <dd>{o.warehouse_name.clone().unwrap_or_else(|| format!("#{}", o.warehouse_id))}</dd>
                                    <dt>"Expected"</dt>
                                    <dd>{o.expected_date.as_ref().map(format_date).unwrap_or_else(|| "-".to_string())}</dd>
                                    <dt>"Created"</dt>
                                    <dd>{format_datetime_opt(o.created_at.as_ref())}</dd>
                                </dl>
                                <table class="lines-table">
                                    <thead>
                                        <tr>
                                            <th>"Product"</th>
                                            <th>"Qty"</th>
                                            <th>"Received"</th>
                                            <th>"Unit cost"</th>
                                            <th>"Amount"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {o
                                            .lines
                                            .iter()
                                            .map(|l| {
                                                let product = match (&l.product_sku, &l.product_name) {
                                                    (Some(sku), Some(name)) => format!("{} · {}", sku, name),
                                                    (Some(sku), None) => sku.clone(),
                                                    _ => format!("#{}", l.product_id),
                                                };
                                                view! {
                                                    <tr>
                                                        <td>{product}</td>
                                                        <td class="table__cell--number">{format_thousands(l.quantity)}</td>
                                                        <td class="table__cell--number">{format_thousands(l.received_quantity)}</td>
                                                        <td class="table__cell--number">{format_money(l.unit_cost)}</td>
                                                        <td class="table__cell--number">{format_money(l.amount())}</td>
                                                    </tr>
                                                }
                                            })
                                            .collect_view()}
                                    </tbody>
                                    <tfoot>
                                        <tr>
                                            <td colspan="4">"Total"</td>
                                            <td class="table__cell--number">{format_money(o.total())}</td>
                                        </tr>
                                    </tfoot>
                                </table>
                            }
                        })
                }}
            </Show>
        </div>
        <div class="modal-footer">
            {move || {
                order
                    .get()
                    .map(|o| {
                        view! {
                            <StatusActions
                                status=o.status
                                on_change=change_status
                                disabled=Signal::derive(move || busy.get())
                            />
                        }
                    })
            }}
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                "Close"
            </Button>
        </div>
    }
}
