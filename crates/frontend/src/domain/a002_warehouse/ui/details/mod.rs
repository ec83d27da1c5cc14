use contracts::domain::a002_warehouse::aggregate::{Warehouse, WarehouseDto};
use contracts::shared::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_warehouse::api;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Cleans up the edited DTO before it is sent.
fn prepare(dto: &WarehouseDto) -> Result<WarehouseDto, String> {
    let dto = WarehouseDto {
        id: dto.id,
        code: dto.code.trim().to_uppercase(),
        name: dto.name.trim().to_string(),
        address: dto.address.as_deref().and_then(optional),
        active: dto.active,
    };
    dto.validate()?;
    Ok(dto)
}

#[component]
pub fn WarehouseDetails(
    id: Option<EntityId>,
    on_saved: Callback<Warehouse>,
    on_close: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(WarehouseDto::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let toast = use_toast();

    if let Some(id) = id {
        busy.set(true);
        spawn_local(async move {
            match api::fetch_by_id(id).await {
                Ok(w) => form.set(w.into()),
                Err(e) => error.set(Some(e.user_message())),
            }
            busy.set(false);
        });
    }

    let save = move || {
        let dto = match form.with_untracked(prepare) {
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
                    toast.success(format!("Warehouse {} saved", saved.code));
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
            <h2 class="modal-title">{if id.is_some() { "Edit warehouse" } else { "New warehouse" }}</h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>
        <div class="modal-body">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="form__row">
                <div class="form__group">
                    <Label>"Code"</Label>
                    <input
                        class="form__input"
                        prop:value=move || form.with(|f| f.code.clone())
                        on:input=move |ev| form.update(|f| f.code = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <Label>"Name"</Label>
                    <input
                        class="form__input"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </div>
            </div>
            <div class="form__group">
                <Label>"Address"</Label>
                <textarea
                    class="form__input"
                    rows="2"
                    prop:value=move || form.with(|f| f.address.clone().unwrap_or_default())
                    on:input=move |ev| form.update(|f| f.address = Some(event_target_value(&ev)))
                ></textarea>
            </div>
            <label class="form__checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.active)
                    on:change=move |ev| form.update(|f| f.active = event_target_checked(&ev))
                />
                " Active"
            </label>
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
    fn prepare_normalizes_code_and_blank_address() {
        let dto = WarehouseDto {
            code: " wh-north ".into(),
            name: "North".into(),
            address: Some("   ".into()),
            ..WarehouseDto::default()
        };
        let prepared = prepare(&dto).unwrap();
        assert_eq!(prepared.code, "WH-NORTH");
        assert_eq!(prepared.address, None);
    }

    #[test]
    fn prepare_reports_missing_name() {
        let dto = WarehouseDto {
            code: "WH1".into(),
            ..WarehouseDto::default()
        };
        assert_eq!(prepare(&dto), Err("Name is required".to_string()));
    }
}
