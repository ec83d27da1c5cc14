use contracts::domain::a002_warehouse::aggregate::Warehouse;
use contracts::shared::EntityId;
use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_warehouse::api;
use crate::domain::a002_warehouse::ui::details::WarehouseDetails;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::confirm::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::{ListState, SearchBar, SortHeader};
use crate::shared::modal_stack::{use_modals, ModalSize};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;

/// Warehouse managers get a read-only table.
#[component]
pub fn WarehouseList() -> impl IntoView {
    let state = RwSignal::new(ListState::new("code"));
    let items: RwSignal<Vec<Warehouse>> = RwSignal::new(Vec::new());
    let toast = use_toast();
    let modals = use_modals();
    let (auth_state, _) = use_auth();
    let can_edit = Signal::derive(move || auth_state.with(|s| s.has_any_role(&[Role::Admin])));

    let load = move || {
        let query = state.with_untracked(ListState::query);
        spawn_local(async move {
            match api::fetch_page(&query).await {
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

    let open_details = move |id: Option<EntityId>| {
        modals.push(ModalSize::Medium, move |handle| {
            view! {
                <WarehouseDetails
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

    let remove = move |id: EntityId, code: String| {
        if !confirm(&format!("Delete warehouse {}?", code)) {
            return;
        }
        spawn_local(async move {
            match api::delete(id).await {
                Ok(()) => {
                    toast.success(format!("Warehouse {} deleted", code));
                    load();
                }
                Err(e) => toast.error(&e),
            }
        });
    };

    view! {
        <PageFrame page_id="warehouses--list" category=PageCategory::List>
            <PageHeader title="Warehouses" count=Signal::derive(move || state.with(|s| s.total_count))>
                <Show when=move || can_edit.get()>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " New"
                    </Button>
                </Show>
            </PageHeader>

            <div class="page__content">
                <SearchBar state=state on_search=reload placeholder="Code or name..." />
                <PaginationControls state=state on_change=reload />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortHeader state=state field="code" label="Code" on_sort=reload />
                                <SortHeader state=state field="name" label="Name" on_sort=reload />
                                <TableHeaderCell>"Address"</TableHeaderCell>
                                <SortHeader state=state field="active" label="Status" on_sort=reload />
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|w| w.id
                                children=move |w| {
                                    let id = w.id;
                                    let code = w.code.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-weight: 500;">{w.code.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{w.name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {w.address.clone().unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if w.active {
                                                        view! { <span class="badge badge--success">"Active"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--neutral">"Closed"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Show when=move || can_edit.get()>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| open_details(Some(id))
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click={
                                                            let code = code.clone();
                                                            move |_| remove(id, code.clone())
                                                        }
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
