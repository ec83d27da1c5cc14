use contracts::domain::a002_warehouse::aggregate::Warehouse;
use contracts::domain::a004_inventory::movement::{InventoryMovement, MovementFilter, MovementType};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_warehouse::api as warehouse_api;
use crate::domain::a004_inventory::api;
use crate::shared::components::entity_select::EntitySelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_datetime;
use crate::shared::format::format_signed;
use crate::shared::list_utils::{ListState, SearchBar, SortHeader};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;

fn movement_type_from_code(code: &str) -> Option<MovementType> {
    MovementType::ALL.into_iter().find(|t| t.code() == code)
}

/// Stock ledger, newest first.
#[component]
pub fn MovementList() -> impl IntoView {
    let state = RwSignal::new({
        let mut s = ListState::new("createdAt");
        s.sort_ascending = false;
        s
    });
    let items: RwSignal<Vec<InventoryMovement>> = RwSignal::new(Vec::new());
    let warehouses: RwSignal<Vec<Warehouse>> = RwSignal::new(Vec::new());
    let warehouse_id = RwSignal::new(None);
    let movement_type = RwSignal::new(None::<MovementType>);
    let toast = use_toast();

    let load = move || {
        let query = state.with_untracked(ListState::query);
        let filter = MovementFilter {
            product_id: None,
            warehouse_id: warehouse_id.get_untracked(),
            movement_type: movement_type.get_untracked(),
        };
        spawn_local(async move {
            match api::fetch_movements(&query, &filter).await {
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
        if let Ok(list) = warehouse_api::fetch_options().await {
            warehouses.set(list);
        }
    });

    Effect::new(move |prev: Option<()>| {
        warehouse_id.track();
        movement_type.track();
        if prev.is_some() {
            state.update(|s| s.go_to(0));
            load();
        }
    });

    view! {
        <PageFrame page_id="movements--list" category=PageCategory::List>
            <PageHeader title="Stock movements" count=Signal::derive(move || state.with(|s| s.total_count))>
                ""
            </PageHeader>

            <div class="page__content">
                <SearchBar state=state on_search=reload placeholder="Reference or reason...">
                    <div style="width: 220px;">
                        <EntitySelect items=warehouses value=warehouse_id placeholder="All warehouses" />
                    </div>
                    <select
                        class="form__select"
                        on:change=move |ev| movement_type.set(movement_type_from_code(&event_target_value(&ev)))
                    >
                        <option value="">"All types"</option>
                        {MovementType::ALL
                            .into_iter()
                            .map(|t| view! { <option value=t.code()>{t.label()}</option> })
                            .collect_view()}
                    </select>
                </SearchBar>
                <PaginationControls state=state on_change=reload />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortHeader state=state field="createdAt" label="When" on_sort=reload />
                                <SortHeader state=state field="movementType" label="Type" on_sort=reload />
                                <TableHeaderCell>"Product"</TableHeaderCell>
                                <TableHeaderCell>"Warehouse"</TableHeaderCell>
                                <SortHeader state=state field="quantity" label="Qty" on_sort=reload />
                                <TableHeaderCell>"Reference"</TableHeaderCell>
                                <TableHeaderCell>"Reason"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|m| m.id
                                children=move |m| {
                                    let product = m.product_sku.clone().unwrap_or_else(|| format!("#{}", m.product_id));
                                    let warehouse = m.warehouse_name.clone().unwrap_or_else(|| format!("#{}", m.warehouse_id));
                                    view! {
                                        <TableRow>
                                            <TableCell>{format_datetime(&m.created_at)}</TableCell>
                                            <TableCell>
                                                <span class="badge badge--neutral">{m.movement_type.label()}</span>
                                            </TableCell>
                                            <TableCell>{product}</TableCell>
                                            <TableCell>{warehouse}</TableCell>
                                            <TableCell class="table__cell--number">
                                                <span class:text--warning=m.quantity < 0>{format_signed(m.quantity)}</span>
                                            </TableCell>
                                            <TableCell>{m.reference.clone().unwrap_or_default()}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{m.reason.clone().unwrap_or_default()}</TableCellLayout>
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

    #[test]
    fn movement_type_select_round_trips_codes() {
        assert_eq!(movement_type_from_code("RELEASE"), Some(MovementType::Release));
        assert_eq!(movement_type_from_code(""), None);
    }
}
