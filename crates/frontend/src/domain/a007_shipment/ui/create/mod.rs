use contracts::domain::a006_sales_order::aggregate::SalesOrder;
use contracts::domain::a007_shipment::aggregate::{CreateShipmentRequest, Shipment};
use contracts::domain::a008_carrier::aggregate::Carrier;
use contracts::shared::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a006_sales_order::api as sales_order_api;
use crate::domain::a007_shipment::api;
use crate::domain::a008_carrier::api as carrier_api;
use crate::shared::components::entity_select::EntitySelect;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

fn build_request(
    sales_order_id: Option<EntityId>,
    carrier_id: Option<EntityId>,
    tracking_number: &str,
) -> Result<CreateShipmentRequest, String> {
    let sales_order_id = sales_order_id.ok_or("Choose a reserved order")?;
    let carrier_id = carrier_id.ok_or("Choose a carrier")?;
    let tracking = tracking_number.trim();
    Ok(CreateShipmentRequest {
        sales_order_id,
        carrier_id,
        tracking_number: (!tracking.is_empty()).then(|| tracking.to_string()),
    })
}

/// Ship a reserved sales order with a carrier.
#[component]
pub fn ShipmentCreate(on_created: Callback<Shipment>, on_close: Callback<()>) -> impl IntoView {
    let orders: RwSignal<Vec<SalesOrder>> = RwSignal::new(Vec::new());
    let carriers: RwSignal<Vec<Carrier>> = RwSignal::new(Vec::new());
    let order_id = RwSignal::new(None);
    let carrier_id = RwSignal::new(None);
    let tracking = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let toast = use_toast();

    spawn_local(async move {
        let (reserved, all_carriers) =
            futures::join!(sales_order_api::fetch_reserved(), carrier_api::fetch_all());
        match reserved {
            Ok(list) if list.is_empty() => error.set(Some("No orders are waiting for shipment".to_string())),
            Ok(list) => orders.set(list),
            Err(e) => error.set(Some(e.user_message())),
        }
        match all_carriers {
            Ok(list) => carriers.set(list.into_iter().filter(|c| c.active).collect()),
            Err(e) => error.set(Some(e.user_message())),
        }
    });

    let submit = move || {
        let request = match build_request(
            order_id.get_untracked(),
            carrier_id.get_untracked(),
            &tracking.get_untracked(),
        ) {
            Ok(request) => request,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            match api::create(&request).await {
                Ok(shipment) => {
                    toast.success("Shipment created");
                    on_created.run(shipment);
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
            <h2 class="modal-title">"New shipment"</h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>
        <div class="modal-body">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="form__group">
                <Label>"Sales order"</Label>
                <EntitySelect items=orders value=order_id placeholder="Reserved order..." />
            </div>
            <div class="form__group">
                <Label>"Carrier"</Label>
                <EntitySelect items=carriers value=carrier_id />
            </div>
            <div class="form__group">
                <Label>"Tracking number"</Label>
                <Input value=tracking placeholder="Optional, can be added later" />
            </div>
        </div>
        <div class="modal-footer">
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                "Cancel"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| submit()
                disabled=Signal::derive(move || busy.get())
            >
                "Create"
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_number_is_optional() {
        let req = build_request(Some(4), Some(2), "  ").unwrap();
        assert_eq!(req.tracking_number, None);
        let req = build_request(Some(4), Some(2), " 1Z999 ").unwrap();
        assert_eq!(req.tracking_number.as_deref(), Some("1Z999"));
    }

    #[test]
    fn order_and_carrier_are_required() {
        assert_eq!(build_request(None, Some(2), ""), Err("Choose a reserved order".to_string()));
        assert_eq!(build_request(Some(4), None, ""), Err("Choose a carrier".to_string()));
    }
}
