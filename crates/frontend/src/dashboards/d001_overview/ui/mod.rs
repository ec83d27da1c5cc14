use contracts::dashboards::d001_overview::DashboardSummary;
use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d001_overview::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::stat_card::{CardTone, StatCard};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;

fn low_stock_tone(count: u64) -> CardTone {
    if count > 0 {
        CardTone::Warning
    } else {
        CardTone::Success
    }
}

fn counter(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let toast = use_toast();
    let summary: RwSignal<Option<DashboardSummary>> = RwSignal::new(None);
    let loading = RwSignal::new(false);

    let is_client = Signal::derive(move || {
        auth_state.with(|s| s.has_any_role(&[Role::Client]) && !s.has_any_role(&Role::STAFF))
    });

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_summary().await {
                Ok(data) => summary.set(Some(data)),
                Err(e) => toast.error(&e),
            }
            loading.set(false);
        });
    };
    load();

    let count = move |pick: fn(&DashboardSummary) -> u64| {
        Signal::derive(move || summary.with(|s| s.as_ref().map(|s| counter(pick(s)))))
    };
    let open = move |key: &'static str| Callback::new(move |_| ctx.open_view(key));

    view! {
        <PageFrame page_id="overview--dashboard" category=PageCategory::Dashboard>
            <PageHeader title="Overview">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || loading.get())
                    on_click=move |_| load()
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <Show
                when=move || !is_client.get()
                fallback=move || {
                    view! {
                        <div class="stat-grid">
                            <StatCard
                                label="My open orders"
                                icon_name="orders"
                                value=count(|s| s.open_sales_orders)
                                on_open=open("my_orders")
                            />
                            <StatCard
                                label="Catalog"
                                icon_name="cart"
                                value=count(|s| s.product_count)
                                on_open=open("catalog")
                            />
                        </div>
                    }
                }
            >
                <div class="stat-grid">
                    <StatCard
                        label="Products"
                        icon_name="products"
                        value=count(|s| s.product_count)
                        on_open=open("products")
                    />
                    <StatCard
                        label="Low-stock items"
                        icon_name="alert"
                        value=count(|s| s.low_stock_count)
                        tone=Signal::derive(move || {
                            summary.with(|s| {
                                s.as_ref()
                                    .map(|s| low_stock_tone(s.low_stock_count))
                                    .unwrap_or_default()
                            })
                        })
                        on_open=open("inventory")
                    />
                    <StatCard
                        label="Open sales orders"
                        icon_name="orders"
                        value=count(|s| s.open_sales_orders)
                        on_open=open("sales_orders")
                    />
                    <StatCard
                        label="Pending shipments"
                        icon_name="shipments"
                        value=count(|s| s.pending_shipments)
                        on_open=open("shipments")
                    />
                    <StatCard
                        label="Open purchase orders"
                        icon_name="purchases"
                        value=count(|s| s.open_purchase_orders)
                        on_open=open("purchase_orders")
                    />
                    <StatCard
                        label="Reserved units"
                        icon_name="inventory"
                        value=Signal::derive(move || summary.with(|s| s.as_ref().map(|s| s.reserved_units)))
                    />
                </div>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_stock_card_warns_only_when_items_are_low() {
        assert_eq!(low_stock_tone(0), CardTone::Success);
        assert_eq!(low_stock_tone(3), CardTone::Warning);
    }

    #[test]
    fn counters_saturate() {
        assert_eq!(counter(42), 42);
        assert_eq!(counter(u64::MAX), i64::MAX);
    }
}
