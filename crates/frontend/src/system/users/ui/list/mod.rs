use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::confirm::confirm;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::icons::icon;
use crate::shared::list_utils::{ListState, SearchBar, SortHeader};
use crate::shared::modal_stack::{use_modals, ModalSize};
use crate::shared::page_frame::{PageCategory, PageFrame, PageHeader};
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;
use crate::system::users::api;
use crate::system::users::ui::details::UserDetails;

fn role_labels(user: &User) -> Vec<&'static str> {
    user.roles.iter().map(|r| r.label()).collect()
}

#[component]
pub fn UsersList() -> impl IntoView {
    let state = RwSignal::new(ListState::new("username"));
    let items: RwSignal<Vec<User>> = RwSignal::new(Vec::new());
    let (loading, set_loading) = signal(false);
    let toast = use_toast();
    let modals = use_modals();
    let (auth_state, _) = use_auth();

    let load_data = move || {
        set_loading.set(true);
        let query = state.with_untracked(ListState::query);
        spawn_local(async move {
            match api::fetch_page(&query).await {
                Ok(page) => {
                    state.update(|s| s.apply_page(&page));
                    items.set(page.content);
                }
                Err(e) => toast.error(&e),
            }
            set_loading.set(false);
        });
    };
    let reload = Callback::new(move |_| load_data());

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    let open_details = move |user: Option<User>| {
        modals.push(ModalSize::Medium, move |handle| {
            view! {
                <UserDetails
                    user=user.clone()
                    on_saved=Callback::new(move |_| {
                        handle.close();
                        load_data();
                    })
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let remove = move |user: User| {
        let is_self = auth_state.with_untracked(|s| {
            s.user_info.as_ref().map(|u| u.username == user.username).unwrap_or(false)
        });
        if is_self {
            toast.info("You cannot delete your own account");
            return;
        }
        if !confirm(&format!("Delete user {}?", user.username)) {
            return;
        }
        spawn_local(async move {
            match api::delete_user(user.id).await {
                Ok(()) => {
                    toast.success(format!("User {} deleted", user.username));
                    load_data();
                }
                Err(e) => toast.error(&e),
            }
        });
    };

    view! {
        <PageFrame page_id="users--list" category=PageCategory::System>
            <PageHeader title="Users" count=Signal::derive(move || state.with(|s| s.total_count))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                    {icon("plus")}
                    " New user"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load_data()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <div class="page__content">
                <SearchBar state=state on_search=reload placeholder="Username, name or email..." />
                <PaginationControls state=state on_change=reload />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortHeader state=state field="username" label="Username" on_sort=reload />
                                <SortHeader state=state field="fullName" label="Full name" on_sort=reload />
                                <SortHeader state=state field="email" label="Email" on_sort=reload />
                                <TableHeaderCell>"Roles"</TableHeaderCell>
                                <SortHeader state=state field="active" label="Status" on_sort=reload />
                                <SortHeader state=state field="lastLoginAt" label="Last login" on_sort=reload />
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|u| u.id
                                children=move |user| {
                                    let username = user.username.clone();
                                    let full_name = user.full_name.clone().unwrap_or_else(|| "-".to_string());
                                    let email = user.email.clone().unwrap_or_else(|| "-".to_string());
                                    let roles = role_labels(&user);
                                    let active = user.active;
                                    let last_login = format_datetime_opt(user.last_login_at.as_ref());
                                    let for_edit = user.clone();
                                    let for_delete = user;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-weight: 500;">{username}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {full_name}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {email}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    {roles
                                                        .into_iter()
                                                        .map(|label| view! { <Badge>{label}</Badge> })
                                                        .collect_view()}
                                                </Flex>
                                            </TableCell>
                                            <TableCell>
                                                {if active {
                                                    view! { <span class="badge badge--success">"Active"</span> }.into_any()
                                                } else {
                                                    view! { <span class="badge badge--neutral">"Disabled"</span> }.into_any()
                                                }}
                                            </TableCell>
                                            <TableCell>{last_login}</TableCell>
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

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::Role;

    #[test]
    fn role_badges_follow_user_roles() {
        let user: User = serde_json::from_str(
            r#"{"id":3,"username":"kim","roles":["WAREHOUSE_MANAGER","AUDITOR","CLIENT"]}"#,
        )
        .unwrap();
        assert_eq!(user.roles, vec![Role::WarehouseManager, Role::Client]);
        assert_eq!(role_labels(&user), vec!["Warehouse manager", "Client"]);
    }
}
