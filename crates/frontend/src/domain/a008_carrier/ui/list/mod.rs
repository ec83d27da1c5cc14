use contracts::domain::a008_carrier::aggregate::Carrier;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a008_carrier::api;
use crate::domain::a008_carrier::ui::details::CarrierDetails;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::confirm::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::{ListState, SearchBar, SortHeader};
use crate::shared::modal_stack::{use_modals, ModalSize};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;

#[component]
pub fn CarrierList() -> impl IntoView {
    let state = RwSignal::new(ListState::new("name"));
    let items: RwSignal<Vec<Carrier>> = RwSignal::new(Vec::new());
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

    let open_details = move |carrier: Option<Carrier>| {
        modals.push(ModalSize::Medium, move |handle| {
            view! {
                <CarrierDetails
                    carrier=carrier.clone()
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

    let remove = move |carrier: Carrier| {
        if !confirm(&format!("Delete carrier {}?", carrier.name)) {
            return;
        }
        spawn_local(async move {
            match api::delete(carrier.id).await {
                Ok(()) => {
                    toast.success(format!("Carrier {} deleted", carrier.name));
                    load();
                }
                Err(e) => toast.error(&e),
            }
        });
    };

    view! {
        <PageFrame page_id="carriers--list" category=PageCategory::List>
            <PageHeader title="Carriers" count=Signal::derive(move || state.with(|s| s.total_count))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                    {icon("plus")}
                    " New"
                </Button>
            </PageHeader>

            <div class="page__content">
                <SearchBar state=state on_search=reload placeholder="Name or code..." />
                <PaginationControls state=state on_change=reload />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortHeader state=state field="name" label="Name" on_sort=reload />
                                <SortHeader state=state field="code" label="Code" on_sort=reload />
                                <TableHeaderCell>"Tracking URL"</TableHeaderCell>
                                <SortHeader state=state field="active" label="Status" on_sort=reload />
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|c| c.id
                                children=move |carrier| {
                                    let for_edit = carrier.clone();
                                    let for_delete = carrier.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{carrier.name.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{carrier.code.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <code>
                                                        {carrier.tracking_url_template.clone().unwrap_or_else(|| "-".to_string())}
                                                    </code>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if carrier.active {
                                                        view! { <span class="badge badge--success">"Active"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--neutral">"Inactive"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| open_details(Some(for_edit.clone()))
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| remove(for_delete.clone())
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
