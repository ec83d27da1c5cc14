use contracts::domain::a005_purchase_order::aggregate::PurchaseOrder;
use leptos::prelude::*;
use thaw::*;

use super::view_model::{LineDraft, PurchaseOrderCreateViewModel};
use crate::shared::components::entity_select::EntitySelect;
use crate::shared::format::format_money;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

#[component]
pub fn PurchaseOrderCreate(
    on_created: Callback<PurchaseOrder>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = PurchaseOrderCreateViewModel::new();
    let toast = use_toast();
    vm.load_options();

    let line_row = move |line: LineDraft| {
        Effect::new(move |_| {
            line.product_id.track();
            vm.product_chosen(line);
        });
        view! {
            <tr>
                <td style="min-width: 260px;">
                    <EntitySelect items=vm.products value=line.product_id placeholder="Product..." />
                </td>
                <td>
                    <input
                        class="form__input form__input--narrow"
                        inputmode="numeric"
                        prop:value=move || line.quantity.get()
                        on:input=move |ev| line.quantity.set(event_target_value(&ev))
                    />
                </td>
                <td>
                    <input
                        class="form__input form__input--narrow"
                        inputmode="decimal"
                        prop:value=move || line.unit_cost.get()
                        on:input=move |ev| line.unit_cost.set(event_target_value(&ev))
                    />
                </td>
                <td>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| vm.remove_line(line.key)
                    >
                        {icon("trash")}
                    </Button>
                </td>
            </tr>
        }
    };

    view! {
        <div class="modal-header">
            <h2 class="modal-title">"New purchase order"</h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>
        <div class="modal-body">
            {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="form__row">
                <div class="form__group">
                    <Label>"Supplier"</Label>
                    <EntitySelect items=vm.suppliers value=vm.supplier_id />
                </div>
                <div class="form__group">
                    <Label>"Receiving warehouse"</Label>
                    <EntitySelect items=vm.warehouses value=vm.warehouse_id />
                </div>
                <div class="form__group">
                    <Label>"Expected date"</Label>
                    <input
                        class="form__input"
                        type="date"
                        prop:value=move || vm.expected_date.get()
                        on:input=move |ev| vm.expected_date.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <table class="lines-table">
                <thead>
                    <tr>
                        <th>"Product"</th>
                        <th>"Qty"</th>
                        <th>"Unit cost"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || vm.lines.get() key=|line| line.key children=line_row />
                </tbody>
            </table>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small on_click=move |_| vm.add_line()>
                    {icon("plus")}
                    " Add line"
                </Button>
                <strong>{move || format!("Total: {}", format_money(vm.total()))}</strong>
            </Flex>
        </div>
        <div class="modal-footer">
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                "Cancel"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| vm.submit(toast, on_created)
                disabled=Signal::derive(move || vm.busy.get())
            >
                "Create"
            </Button>
        </div>
    }
}
