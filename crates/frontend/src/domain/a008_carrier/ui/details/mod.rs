//! Carrier editor. There is no `GET /api/carriers/{id}`, so the row from the
//! list is edited as passed in.

use contracts::domain::a008_carrier::aggregate::{Carrier, CarrierDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a008_carrier::api;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

const SAMPLE_TRACKING: &str = "TRACK123";

fn prepare(dto: &CarrierDto) -> Result<CarrierDto, String> {
    let template = dto
        .tracking_url_template
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let dto = CarrierDto {
        id: dto.id,
        name: dto.name.trim().to_string(),
        code: dto.code.trim().to_uppercase(),
        tracking_url_template: template,
        active: dto.active,
    };
    dto.validate()?;
    Ok(dto)
}

/// Link the template would produce for a sample tracking number.
fn preview(dto: &CarrierDto) -> Option<String> {
    let carrier = Carrier {
        id: 0,
        name: dto.name.clone(),
        code: dto.code.clone(),
        tracking_url_template: dto.tracking_url_template.clone(),
        active: dto.active,
    };
    carrier.tracking_url(SAMPLE_TRACKING)
}

#[component]
pub fn CarrierDetails(
    carrier: Option<Carrier>,
    on_saved: Callback<Carrier>,
    on_close: Callback<()>,
) -> impl IntoView {
    let is_edit = carrier.is_some();
    let form = RwSignal::new(carrier.map(CarrierDto::from).unwrap_or_default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let toast = use_toast();

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
                    toast.success(format!("Carrier {} saved", saved.name));
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
            <h2 class="modal-title">{if is_edit { "Edit carrier" } else { "New carrier" }}</h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>
        <div class="modal-body">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="form__row">
                <div class="form__group">
                    <Label>"Name"</Label>
                    <input
                        class="form__input"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <Label>"Code"</Label>
                    <input
                        class="form__input"
                        prop:value=move || form.with(|f| f.code.clone())
                        on:input=move |ev| form.update(|f| f.code = event_target_value(&ev))
                    />
                </div>
            </div>
            <div class="form__group">
                <Label>"Tracking URL template"</Label>
                <input
                    class="form__input"
                    placeholder="https://carrier.example/track/{tracking}"
                    prop:value=move || form.with(|f| f.tracking_url_template.clone().unwrap_or_default())
                    on:input=move |ev| {
                        form.update(|f| f.tracking_url_template = Some(event_target_value(&ev)))
                    }
                />
                <div class="form__hint">
                    {move || match form.with(preview) {
                        Some(url) => format!("Example: {}", url),
                        None => "Use {tracking} where the tracking number goes".to_string(),
                    }}
                </div>
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

    fn dto(template: Option<&str>) -> CarrierDto {
        CarrierDto {
            name: "Fast Freight".into(),
            code: "ff".into(),
            tracking_url_template: template.map(str::to_string),
            ..CarrierDto::default()
        }
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        assert!(prepare(&dto(Some("https://ff.example/track"))).is_err());
        assert!(prepare(&dto(Some("https://ff.example/t/{tracking}"))).is_ok());
    }

    #[test]
    fn blank_template_is_dropped() {
        let prepared = prepare(&dto(Some("   "))).unwrap();
        assert_eq!(prepared.tracking_url_template, None);
        assert_eq!(prepared.code, "FF");
    }

    #[test]
    fn preview_uses_sample_number() {
        assert_eq!(
            preview(&dto(Some("https://ff.example/t/{tracking}"))).as_deref(),
            Some("https://ff.example/t/TRACK123")
        );
        assert_eq!(preview(&dto(None)), None);
    }
}
