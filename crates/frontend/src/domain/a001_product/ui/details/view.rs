use contracts::domain::a001_product::aggregate::Product;
use contracts::shared::EntityId;
use leptos::prelude::*;
use thaw::*;

use super::view_model::ProductDetailsViewModel;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

#[component]
pub fn ProductDetails(
    id: Option<EntityId>,
    on_saved: Callback<Product>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = ProductDetailsViewModel::new();
    let toast = use_toast();
    if let Some(id) = id {
        vm.load(id);
    }

    view! {
        <div class="modal-header">
            <h2 class="modal-title">
                {move || if vm.is_edit_mode() { "Edit product" } else { "New product" }}
            </h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>

        <div class="modal-body">
            {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="form__group">
                <Label>"SKU"</Label>
                <input
                    class="form__input"
                    prop:value=move || vm.form.with(|f| f.sku.clone())
                    on:input=move |ev| vm.form.update(|f| f.sku = event_target_value(&ev))
                    disabled=move || vm.busy.get()
                />
            </div>
            <div class="form__group">
                <Label>"Name"</Label>
                <input
                    class="form__input"
                    prop:value=move || vm.form.with(|f| f.name.clone())
                    on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                    disabled=move || vm.busy.get()
                />
            </div>
            <div class="form__group">
                <Label>"Description"</Label>
                <textarea
                    class="form__input"
                    rows="3"
                    prop:value=move || vm.form.with(|f| f.description.clone())
                    on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    disabled=move || vm.busy.get()
                ></textarea>
            </div>
            <div class="form__row">
                <div class="form__group">
                    <Label>"Unit price"</Label>
                    <input
                        class="form__input"
                        inputmode="decimal"
                        prop:value=move || vm.form.with(|f| f.unit_price.clone())
                        on:input=move |ev| vm.form.update(|f| f.unit_price = event_target_value(&ev))
                        disabled=move || vm.busy.get()
                    />
                </div>
                <div class="form__group">
                    <Label>"Unit"</Label>
                    <input
                        class="form__input"
                        prop:value=move || vm.form.with(|f| f.unit.clone())
                        on:input=move |ev| vm.form.update(|f| f.unit = event_target_value(&ev))
                        disabled=move || vm.busy.get()
                    />
                </div>
            </div>
            <div class="form__group">
                <label class="form__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || vm.form.with(|f| f.active)
                        on:change=move |ev| vm.form.update(|f| f.active = event_target_checked(&ev))
                    />
                    " Active"
                </label>
            </div>
        </div>

        <div class="modal-footer">
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| on_close.run(())
                disabled=Signal::derive(move || vm.busy.get())
            >
                "Cancel"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| vm.save(toast, on_saved)
                disabled=Signal::derive(move || vm.busy.get())
            >
                {move || if vm.is_edit_mode() { "Save" } else { "Create" }}
            </Button>
        </div>
    }
}
