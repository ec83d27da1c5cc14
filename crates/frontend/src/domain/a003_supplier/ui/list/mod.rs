use contracts::domain::a003_supplier::aggregate::Supplier;
use contracts::shared::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_supplier::api;
use crate::domain::a003_supplier::ui::details::SupplierDetails;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::confirm::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::{ListState, SearchBar, SortHeader};
use crate::shared::modal_stack::{use_modals, ModalSize};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn SupplierList() -> impl IntoView {
    let state = RwSignal::new(ListState::new("name"));
    let items: RwSignal<Vec<Supplier>> = RwSignal::new(Vec::new());
    let toast = use_toast();
    let modals = use_modals();

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
                <SupplierDetails
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

    let remove = move |id: EntityId, name: String| {
        if !confirm(&format!("Delete supplier {}?", name)) {
            return;
        }
        spawn_local(async move {
            match api::delete(id).await {
                Ok(()) => {
                    toast.success(format!("Supplier {} deleted", name));
                    load();
                }
                Err(e) => toast.error(&e),
            }
        });
    };

    view! {
        <PageFrame page_id="suppliers--list" category=PageCategory::List>
            <PageHeader title="Suppliers" count=Signal::derive(move || state.with(|s| s.total_count))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                    {icon("plus")}
                    " New"
                </Button>
            </PageHeader>

            <div class="page__content">
                <SearchBar state=state on_search=reload placeholder="Name or email..." />
                <PaginationControls state=state on_change=reload />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortHeader state=state field="name" label="Name" on_sort=reload />
                                <SortHeader state=state field="contactEmail" label="Email" on_sort=reload />
                                <TableHeaderCell>"Phone"</TableHeaderCell>
                                <TableHeaderCell>"Address"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|s| s.id
                                children=move |s| {
                                    let id = s.id;
                                    let name = s.name.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        style="color: var(--colorBrandForeground1); font-weight: 500;"
                                                        on:click=move |ev| {
                                                            ev.prevent_default();
                                                            open_details(Some(id));
                                                        }
                                                    >
                                                        {s.name.clone()}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{or_dash(&s.contact_email)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{or_dash(&s.phone)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{or_dash(&s.address)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| remove(id, name.clone())
                                                >
                                                    {icon("trash")}
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
