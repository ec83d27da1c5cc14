use contracts::domain::a003_supplier::aggregate::{Supplier, SupplierDto};
use contracts::shared::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_supplier::api;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

/// Form text for the optional fields is kept as plain strings.
#[derive(Debug, Clone, Default, PartialEq)]
struct SupplierForm {
    id: Option<EntityId>,
    name: String,
    contact_email: String,
    phone: String,
    address: String,
}

impl From<Supplier> for SupplierForm {
    fn from(s: Supplier) -> Self {
        Self {
            id: Some(s.id),
            name: s.name,
            contact_email: s.contact_email.unwrap_or_default(),
            phone: s.phone.unwrap_or_default(),
            address: s.address.unwrap_or_default(),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl SupplierForm {
    fn to_dto(&self) -> Result<SupplierDto, String> {
        let dto = SupplierDto {
            id: self.id,
            name: self.name.trim().to_string(),
            contact_email: optional(&self.contact_email),
            phone: optional(&self.phone),
            address: optional(&self.address),
        };
        dto.validate()?;
        Ok(dto)
    }
}

#[component]
pub fn SupplierDetails(
    id: Option<EntityId>,
    on_saved: Callback<Supplier>,
    on_close: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(SupplierForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let toast = use_toast();

    if let Some(id) = id {
        busy.set(true);
        spawn_local(async move {
            match api::fetch_by_id(id).await {
                Ok(s) => form.set(s.into()),
                Err(e) => error.set(Some(e.user_message())),
            }
            busy.set(false);
        });
    }

    let save = move || {
        let dto = match form.with_untracked(SupplierForm::to_dto) {
            Ok(dto) => dto,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            match api::save(&dto).await {
                Ok(saved) => {
                    toast.success(format!("Supplier {} saved", saved.name));
                    on_saved.run(saved);
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
            <h2 class="modal-title">{if id.is_some() { "Edit supplier" } else { "New supplier" }}</h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>
        <div class="modal-body">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="form__group">
                <Label>"Name"</Label>
                <input
                    class="form__input"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
            </div>
            <div class="form__row">
                <div class="form__group">
                    <Label>"Contact email"</Label>
                    <input
                        class="form__input"
                        type="email"
                        prop:value=move || form.with(|f| f.contact_email.clone())
                        on:input=move |ev| form.update(|f| f.contact_email = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <Label>"Phone"</Label>
                    <input
                        class="form__input"
                        type="tel"
                        prop:value=move || form.with(|f| f.phone.clone())
                        on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                    />
                </div>
            </div>
            <div class="form__group">
                <Label>"Address"</Label>
                <textarea
                    class="form__input"
                    rows="2"
                    prop:value=move || form.with(|f| f.address.clone())
                    on:input=move |ev| form.update(|f| f.address = event_target_value(&ev))
                ></textarea>
            </div>
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
    fn blank_optional_fields_become_none() {
        let form = SupplierForm {
            name: " Acme ".into(),
            phone: "  ".into(),
            contact_email: "orders@acme.example".into(),
            ..SupplierForm::default()
        };
        let dto = form.to_dto().unwrap();
        assert_eq!(dto.name, "Acme");
        assert_eq!(dto.phone, None);
        assert_eq!(dto.contact_email.as_deref(), Some("orders@acme.example"));
    }

    #[test]
    fn invalid_email_is_rejected_before_sending() {
        let form = SupplierForm {
            name: "Acme".into(),
            contact_email: "nobody".into(),
            ..SupplierForm::default()
        };
        assert!(form.to_dto().is_err());
    }
}
