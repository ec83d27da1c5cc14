use contracts::shared::EntityId;
use contracts::system::auth::Role;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::toast::use_toast;
use crate::system::users::api;

#[derive(Debug, Clone, Default, PartialEq)]
struct UserForm {
    id: Option<EntityId>,
    username: String,
    password: String,
    email: String,
    full_name: String,
    roles: Vec<Role>,
    active: bool,
}

impl From<User> for UserForm {
    fn from(u: User) -> Self {
        Self {
            id: Some(u.id),
            username: u.username,
            password: String::new(),
            email: u.email.unwrap_or_default(),
            full_name: u.full_name.unwrap_or_default(),
            roles: u.roles,
            active: u.active,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

enum UserChange {
    Create(CreateUserDto),
    Update(UpdateUserDto),
}

impl UserForm {
    fn new_user() -> Self {
        Self {
            roles: vec![Role::Client],
            active: true,
            ..Self::default()
        }
    }

    fn toggle_role(&mut self, role: Role, on: bool) {
        if on {
            if !self.roles.contains(&role) {
                self.roles.push(role);
                self.roles.sort();
            }
        } else {
            self.roles.retain(|r| *r != role);
        }
    }

    fn to_change(&self) -> Result<UserChange, String> {
        match self.id {
            None => {
                let dto = CreateUserDto {
                    username: self.username.trim().to_string(),
                    password: self.password.clone(),
                    email: optional(&self.email),
                    full_name: optional(&self.full_name),
                    roles: self.roles.clone(),
                };
                dto.validate()?;
                Ok(UserChange::Create(dto))
            }
            Some(id) => {
                if self.roles.is_empty() {
                    return Err("Assign at least one role".to_string());
                }
                Ok(UserChange::Update(UpdateUserDto {
                    id,
                    email: optional(&self.email),
                    full_name: optional(&self.full_name),
                    roles: self.roles.clone(),
                    active: self.active,
                }))
            }
        }
    }
}

/// Create or edit a user. Usernames and passwords are only set on create.
#[component]
pub fn UserDetails(
    user: Option<User>,
    on_saved: Callback<User>,
    on_close: Callback<()>,
) -> impl IntoView {
    let is_edit = user.is_some();
    let form = RwSignal::new(user.map(UserForm::from).unwrap_or_else(UserForm::new_user));
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let toast = use_toast();

    let save = move || {
        let change = match form.with_untracked(UserForm::to_change) {
            Ok(change) => change,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            let result = match &change {
                UserChange::Create(dto) => api::create_user(dto).await,
                UserChange::Update(dto) => api::update_user(dto).await,
            };
            match result {
                Ok(user) => {
                    toast.success(format!("User {} saved", user.username));
                    on_saved.run(user);
                }
                Err(e) => {
                    error.set(Some(e.user_message()));
                    toast.error(&e);
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="modal-header">
            <h2 class="modal-title">
                {move || {
                    if is_edit {
                        format!("Edit user {}", form.with(|f| f.username.clone()))
                    } else {
                        "New user".to_string()
                    }
                }}
            </h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>
        <div class="modal-body">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <Show when=move || !is_edit>
                <div class="form__row">
                    <div class="form__group">
                        <Label>"Username"</Label>
                        <input
                            class="form__input"
                            autocomplete="off"
                            prop:value=move || form.with(|f| f.username.clone())
                            on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        />
                    </div>
                    <div class="form__group">
                        <Label>"Password"</Label>
                        <input
                            class="form__input"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                    </div>
                </div>
            </Show>
            <div class="form__row">
                <div class="form__group">
                    <Label>"Full name"</Label>
                    <input
                        class="form__input"
                        prop:value=move || form.with(|f| f.full_name.clone())
                        on:input=move |ev| form.update(|f| f.full_name = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <Label>"Email"</Label>
                    <input
                        class="form__input"
                        type="email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </div>
            </div>
            <div class="form__group">
                <Label>"Roles"</Label>
                <Flex gap=FlexGap::Large>
                    {Role::ALL
                        .into_iter()
                        .map(|role| {
                            view! {
                                <label class="form__checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || form.with(|f| f.roles.contains(&role))
                                        on:change=move |ev| {
                                            let on = event_target_checked(&ev);
                                            form.update(|f| f.toggle_role(role, on));
                                        }
                                    />
                                    " "
                                    {role.label()}
                                </label>
                            }
                        })
                        .collect_view()}
                </Flex>
            </div>
            <Show when=move || is_edit>
                <label class="form__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.active)
                        on:change=move |ev| form.update(|f| f.active = event_target_checked(&ev))
                    />
                    " Active"
                </label>
            </Show>
        </div>
        <div class="modal-footer">
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                "Cancel"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| save()
                disabled=Signal::derive(move || busy.get())
            >
                "Save"
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_goes_through_create_validation() {
        let mut form = UserForm::new_user();
        form.username = "picker".into();
        form.password = "short".into();
        assert!(form.to_change().is_err());
        form.password = "long enough".into();
        assert!(matches!(form.to_change(), Ok(UserChange::Create(_))));
    }

    #[test]
    fn edit_requires_a_role() {
        let mut form = UserForm {
            id: Some(5),
            username: "wm".into(),
            roles: vec![Role::WarehouseManager],
            active: true,
            ..UserForm::default()
        };
        match form.to_change() {
            Ok(UserChange::Update(dto)) => assert_eq!(dto.id, 5),
            _ => panic!("expected update"),
        }
        form.toggle_role(Role::WarehouseManager, false);
        assert_eq!(form.to_change().err().as_deref(), Some("Assign at least one role"));
    }

    #[test]
    fn roles_stay_ordered_and_unique() {
        let mut form = UserForm::new_user();
        form.toggle_role(Role::Admin, true);
        form.toggle_role(Role::Admin, true);
        assert_eq!(form.roles, vec![Role::Admin, Role::Client]);
    }
}
