use std::collections::HashMap;

use contracts::domain::a007_shipment::aggregate::{Shipment, ShipmentFilter, ShipmentStatus};
use contracts::domain::a008_carrier::aggregate::Carrier;
use contracts::shared::{EntityId, StatusFlow};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a007_shipment::api;
use crate::domain::a007_shipment::ui::create::ShipmentCreate;
use crate::domain::a008_carrier::api as carrier_api;
use crate::shared::components::entity_select::EntitySelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_badge::{StatusActions, StatusBadge, StatusFilter};
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::icons::icon;
use crate::shared::list_utils::{ListState, SearchBar, SortHeader};
use crate::shared::modal_stack::{use_modals, ModalSize};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;

/// Tracking link for a shipment, if its carrier publishes one.
fn tracking_link(shipment: &Shipment, carriers: &HashMap<EntityId, Carrier>) -> Option<String> {
    let number = shipment.tracking_number.as_deref()?;
    carriers.get(&shipment.carrier_id)?.tracking_url(number)
}

#[component]
pub fn ShipmentList() -> impl IntoView {
    let state = RwSignal::new({
        let mut s = ListState::new("createdAt");
        s.sort_ascending = false;
        s
    });
    let items: RwSignal<Vec<Shipment>> = RwSignal::new(Vec::new());
    let carriers: RwSignal<Vec<Carrier>> = RwSignal::new(Vec::new());
    let carrier_map = Memo::new(move |_| {
        carriers.with(|list| list.iter().map(|c| (c.id, c.clone())).collect::<HashMap<_, _>>())
    });
    let status = RwSignal::new(None::<ShipmentStatus>);
    let carrier_id = RwSignal::new(None);
    let busy = RwSignal::new(false);
    let toast = use_toast();
    let modals = use_modals();

    let load = move || {
        let query = state.with_untracked(ListState::query);
        let filter = ShipmentFilter {
            status: status.get_untracked(),
            carrier_id: carrier_id.get_untracked(),
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

    spawn_local(async move {
        match carrier_api::fetch_all().await {
            Ok(list) => carriers.set(list),
            Err(e) => log::warn!("Failed to load carriers: {}", e),
        }
    });

    Effect::new(move |prev: Option<()>| {
        status.track();
        carrier_id.track();
        if prev.is_some() {
            state.update(|s| s.go_to(0));
            load();
        }
    });

    let open_create = move || {
        modals.push(ModalSize::Medium, move |handle| {
            view! {
                <ShipmentCreate
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

    let change_status = move |id: EntityId, next: ShipmentStatus| {
        busy.set(true);
        spawn_local(async move {
            match api::change_status(id, next).await {
                Ok(updated) => {
                    toast.success(format!("Shipment is now {}", updated.status.label()));
                    load();
                }
                Err(e) => toast.error(&e),
            }
            busy.set(false);
        });
    };

    view! {
        <PageFrame page_id="shipments--list" category=PageCategory::List>
            <PageHeader title="Shipments" count=Signal::derive(move || state.with(|s| s.total_count))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_create()>
                    {icon("plus")}
                    " New"
                </Button>
            </PageHeader>

            <div class="page__content">
                <SearchBar state=state on_search=reload placeholder="Order or tracking number...">
                    <StatusFilter value=status />
                    <div style="width: 200px;">
                        <EntitySelect items=carriers value=carrier_id placeholder="All carriers" />
                    </div>
                </SearchBar>
                <PaginationControls state=state on_change=reload />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Order"</TableHeaderCell>
                                <TableHeaderCell>"Carrier"</TableHeaderCell>
                                <TableHeaderCell>"Tracking"</TableHeaderCell>
                                <SortHeader state=state field="status" label="Status" on_sort=reload />
                                <SortHeader state=state field="shippedAt" label="Shipped" on_sort=reload />
                                <SortHeader state=state field="deliveredAt" label="Delivered" on_sort=reload />
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|s| (s.id, s.status)
                                children=move |s| {
                                    let id = s.id;
                                    let carrier_id = s.carrier_id;
                                    let fallback_name = s.carrier_name.clone();
                                    let tracking_shipment = s.clone();
                                    let carrier_name = move || {
                                        carrier_map
                                            .with(|m| m.get(&carrier_id).map(|c| c.name.clone()))
                                            .or_else(|| fallback_name.clone())
                                            .unwrap_or_else(|| format!("#{}", carrier_id))
                                    };
                                    let tracking = move || {
                                        let number = tracking_shipment.tracking_number.clone().unwrap_or_default();
                                        match carrier_map.with(|m| tracking_link(&tracking_shipment, m)) {
                                            Some(url) => view! {
                                                <a href=url target="_blank" rel="noopener">
                                                    {number}
                                                    " "
                                                    {icon("external-link")}
                                                </a>
                                            }
                                            .into_any(),
                                            None => view! { <span>{number}</span> }.into_any(),
                                        }
                                    };
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                {s.sales_order_number.clone().unwrap_or_else(|| format!("#{}", s.sales_order_id))}
                                            </TableCell>
                                            <TableCell>{carrier_name}</TableCell>
                                            <TableCell>{tracking}</TableCell>
                                            <TableCell>
                                                <StatusBadge status=s.status />
                                            </TableCell>
                                            <TableCell>{format_datetime_opt(s.shipped_at.as_ref())}</TableCell>
                                            <TableCell>{format_datetime_opt(s.delivered_at.as_ref())}</TableCell>
                                            <TableCell>
                                                <StatusActions
                                                    status=s.status
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

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(carrier_id: EntityId, tracking: Option<&str>) -> Shipment {
        Shipment {
            id: 1,
            sales_order_id: 9,
            sales_order_number: None,
            carrier_id,
            carrier_name: None,
            tracking_number: tracking.map(str::to_string),
            status: ShipmentStatus::InTransit,
            shipped_at: None,
            delivered_at: None,
            created_at: None,
        }
    }

    #[test]
    fn link_needs_number_and_known_carrier() {
        let mut carriers = HashMap::new();
        carriers.insert(
            2,
            Carrier {
                id: 2,
                name: "Fast Freight".into(),
                code: "FF".into(),
                tracking_url_template: Some("https://ff.example/t/{tracking}".into()),
                active: true,
            },
        );
        assert_eq!(
            tracking_link(&shipment(2, Some("ABC1")), &carriers).as_deref(),
            Some("https://ff.example/t/ABC1")
        );
        assert_eq!(tracking_link(&shipment(2, None), &carriers), None);
        assert_eq!(tracking_link(&shipment(3, Some("ABC1")), &carriers), None);
    }
}
