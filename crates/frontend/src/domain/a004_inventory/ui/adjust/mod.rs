use contracts::domain::a004_inventory::aggregate::{Inventory, StockAdjustmentRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_inventory::api;
use crate::shared::format::{format_signed, format_thousands};
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

/// Parses the signed quantity field. A leading `+` is accepted.
fn parse_quantity(raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    raw.parse::<i64>()
        .map_err(|_| "Quantity must be a whole number, e.g. 5 or -3".to_string())
}

fn build_request(row: &Inventory, quantity: &str, reason: &str) -> Result<StockAdjustmentRequest, String> {
    let request = StockAdjustmentRequest {
        product_id: row.product_id,
        warehouse_id: row.warehouse_id,
        quantity: parse_quantity(quantity)?,
        reason: reason.trim().to_string(),
    };
    request.validate()?;
    if row.on_hand + request.quantity < 0 {
        return Err(format!("Only {} on hand", row.on_hand));
    }
    Ok(request)
}

/// Manual stock correction for one inventory row.
#[component]
pub fn AdjustStock(row: Inventory, on_done: Callback<()>, on_close: Callback<()>) -> impl IntoView {
    let quantity = RwSignal::new(String::new());
    let reason = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let toast = use_toast();
    let row = StoredValue::new(row);

    let resulting = move || {
        let on_hand = row.with_value(|r| r.on_hand);
        parse_quantity(&quantity.get())
            .map(|q| format!("{} → {}", format_signed(q), format_thousands(on_hand + q)))
            .unwrap_or_default()
    };

    let submit = move || {
        let request = match row.with_value(|r| build_request(r, &quantity.get_untracked(), &reason.get_untracked())) {
            Ok(request) => request,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            match api::adjust(&request).await {
                Ok(()) => {
                    toast.success(format!("Stock adjusted by {}", format_signed(request.quantity)));
                    on_done.run(());
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
            <h2 class="modal-title">"Adjust stock"</h2>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                {icon("x")}
            </Button>
        </div>
        <div class="modal-body">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <dl class="details-grid">
                <dt>"Product"</dt>
                <dd>{row.with_value(|r| format!("{} · {}", r.product_sku, r.product_name))}</dd>
                <dt>"Warehouse"</dt>
                <dd>{row.with_value(|r| r.warehouse_name.clone())}</dd>
                <dt>"On hand / reserved"</dt>
                <dd>
                    {row.with_value(|r| format!("{} / {}", format_thousands(r.on_hand), format_thousands(r.reserved)))}
                </dd>
            </dl>
            <div class="form__group">
                <Label>"Quantity (+ adds, - removes)"</Label>
                <Input value=quantity placeholder="e.g. -3" />
                <div class="form__hint">{resulting}</div>
            </div>
            <div class="form__group">
                <Label>"Reason"</Label>
                <Input value=reason placeholder="Damaged, stocktake, ..." />
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
                "Apply"
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(on_hand: i64) -> Inventory {
        Inventory {
            id: 1,
            product_id: 7,
            product_sku: "BOX-S".into(),
            product_name: "Small box".into(),
            warehouse_id: 3,
            warehouse_name: "East".into(),
            on_hand,
            reserved: 0,
            available: None,
            reorder_level: 0,
        }
    }

    #[test]
    fn quantity_accepts_explicit_sign() {
        assert_eq!(parse_quantity("+5"), Ok(5));
        assert_eq!(parse_quantity(" -3 "), Ok(-3));
        assert!(parse_quantity("2.5").is_err());
    }

    #[test]
    fn request_targets_the_row() {
        let req = build_request(&row(10), "-4", " damaged ").unwrap();
        assert_eq!((req.product_id, req.warehouse_id), (7, 3));
        assert_eq!(req.quantity, -4);
        assert_eq!(req.reason, "damaged");
    }

    #[test]
    fn cannot_remove_more_than_on_hand() {
        assert_eq!(build_request(&row(2), "-3", "lost"), Err("Only 2 on hand".to_string()));
        assert!(build_request(&row(2), "0", "noop").is_err());
    }
}
