use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_warehouse::aggregate::Warehouse;
use contracts::domain::a003_supplier::aggregate::Supplier;
use contracts::domain::a005_purchase_order::aggregate::{
    CreatePurchaseOrderRequest, PurchaseOrder, PurchaseOrderLineRequest,
};
use contracts::shared::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_product::api as product_api;
use crate::domain::a002_warehouse::api as warehouse_api;
use crate::domain::a003_supplier::api as supplier_api;
use crate::domain::a005_purchase_order::api;
use crate::shared::date_utils::parse_input_date;
use crate::shared::toast::ToastService;

/// Plain values of one editor row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineInput {
    pub product_id: Option<EntityId>,
    pub quantity: String,
    pub unit_cost: String,
}

impl LineInput {
    fn to_request(&self, number: usize) -> Result<PurchaseOrderLineRequest, String> {
        let product_id = self
            .product_id
            .ok_or_else(|| format!("Line {}: choose a product", number))?;
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("Line {}: quantity must be a whole number", number))?;
        let unit_cost = self
            .unit_cost
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| format!("Line {}: unit cost must be a number", number))?;
        Ok(PurchaseOrderLineRequest {
            product_id,
            quantity,
            unit_cost,
        })
    }
}

pub fn build_request(
    supplier_id: Option<EntityId>,
    warehouse_id: Option<EntityId>,
    expected_date: &str,
    lines: &[LineInput],
) -> Result<CreatePurchaseOrderRequest, String> {
    let supplier_id = supplier_id.ok_or("Choose a supplier")?;
    let warehouse_id = warehouse_id.ok_or("Choose a receiving warehouse")?;
    let expected_date = parse_input_date(expected_date)?;
    let lines = lines
        .iter()
        .enumerate()
        .map(|(i, line)| line.to_request(i + 1))
        .collect::<Result<Vec<_>, _>>()?;
    let request = CreatePurchaseOrderRequest {
        supplier_id,
        warehouse_id,
        expected_date,
        lines,
    };
    request.validate()?;
    Ok(request)
}

/// Sum of the lines that parse; rows still being typed count as zero.
pub fn draft_total(lines: &[LineInput]) -> f64 {
    lines
        .iter()
        .filter_map(|l| l.to_request(0).ok())
        .map(|l| l.quantity as f64 * l.unit_cost)
        .sum()
}

/// One editor row. Each field is its own signal so typing does not
/// re-render the whole table.
#[derive(Clone, Copy)]
pub struct LineDraft {
    pub key: u64,
    pub product_id: RwSignal<Option<EntityId>>,
    pub quantity: RwSignal<String>,
    pub unit_cost: RwSignal<String>,
}

impl LineDraft {
    fn new(key: u64) -> Self {
        Self {
            key,
            product_id: RwSignal::new(None),
            quantity: RwSignal::new("1".to_string()),
            unit_cost: RwSignal::new(String::new()),
        }
    }

    pub fn input(&self) -> LineInput {
        LineInput {
            product_id: self.product_id.get(),
            quantity: self.quantity.get(),
            unit_cost: self.unit_cost.get(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct PurchaseOrderCreateViewModel {
    pub supplier_id: RwSignal<Option<EntityId>>,
    pub warehouse_id: RwSignal<Option<EntityId>>,
    pub expected_date: RwSignal<String>,
    pub lines: RwSignal<Vec<LineDraft>>,
    pub suppliers: RwSignal<Vec<Supplier>>,
    pub warehouses: RwSignal<Vec<Warehouse>>,
    pub products: RwSignal<Vec<Product>>,
    pub error: RwSignal<Option<String>>,
    pub busy: RwSignal<bool>,
    next_key: StoredValue<u64>,
}

impl PurchaseOrderCreateViewModel {
    pub fn new() -> Self {
        let vm = Self {
            supplier_id: RwSignal::new(None),
            warehouse_id: RwSignal::new(None),
            expected_date: RwSignal::new(String::new()),
            lines: RwSignal::new(Vec::new()),
            suppliers: RwSignal::new(Vec::new()),
            warehouses: RwSignal::new(Vec::new()),
            products: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            busy: RwSignal::new(false),
            next_key: StoredValue::new(0),
        };
        vm.add_line();
        vm
    }

    /// Reference lists for the three drop-downs.
    pub fn load_options(&self) {
        let vm = *self;
        spawn_local(async move {
            let (suppliers, warehouses, products) = futures::join!(
                supplier_api::fetch_options(),
                warehouse_api::fetch_options(),
                product_api::fetch_options()
            );
            match (suppliers, warehouses, products) {
                (Ok(s), Ok(w), Ok(p)) => {
                    vm.suppliers.set(s);
                    vm.warehouses.set(w);
                    vm.products.set(p.into_iter().filter(|p| p.active).collect());
                }
                (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                    vm.error.set(Some(e.user_message()));
                }
            }
        });
    }

    pub fn add_line(&self) {
        let key = self.next_key.get_value();
        self.next_key.set_value(key + 1);
        self.lines.update(|l| l.push(LineDraft::new(key)));
    }

    pub fn remove_line(&self, key: u64) {
        self.lines.update(|l| l.retain(|d| d.key != key));
    }

    /// Picking a product fills in its list price as a starting cost.
    pub fn product_chosen(&self, line: LineDraft) {
        let Some(id) = line.product_id.get_untracked() else {
            return;
        };
        if !line.unit_cost.get_untracked().trim().is_empty() {
            return;
        }
        let price = self
            .products
            .with_untracked(|ps| ps.iter().find(|p| p.id == id).map(|p| p.unit_price));
        if let Some(price) = price {
            line.unit_cost.set(format!("{:.2}", price));
        }
    }

    pub fn line_inputs(&self) -> Vec<LineInput> {
        self.lines.with(|lines| lines.iter().map(LineDraft::input).collect())
    }

    pub fn total(&self) -> f64 {
        draft_total(&self.line_inputs())
    }

    pub fn submit(&self, toast: ToastService, on_created: Callback<PurchaseOrder>) {
        let request = match build_request(
            self.supplier_id.get_untracked(),
            self.warehouse_id.get_untracked(),
            &self.expected_date.get_untracked(),
            &untrack(|| self.line_inputs()),
        ) {
            Ok(request) => request,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        };
        let vm = *self;
        vm.busy.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match api::create(&request).await {
                Ok(order) => {
                    toast.success(format!("Purchase order {} created", order.order_number));
                    on_created.run(order);
                }
                Err(e) => {
                    vm.error.set(Some(e.user_message()));
                    toast.error(&e);
                }
            }
            vm.busy.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: Option<EntityId>, quantity: &str, unit_cost: &str) -> LineInput {
        LineInput {
            product_id,
            quantity: quantity.into(),
            unit_cost: unit_cost.into(),
        }
    }

    #[test]
    fn builds_request_with_date_and_lines() {
        let req = build_request(
            Some(1),
            Some(2),
            "2024-06-30",
            &[line(Some(10), "5", "2,40"), line(Some(11), "1", "100")],
        )
        .unwrap();
        assert_eq!(req.supplier_id, 1);
        assert_eq!(req.expected_date.map(|d| d.to_string()).as_deref(), Some("2024-06-30"));
        assert_eq!(req.lines.len(), 2);
        assert_eq!(req.lines[0].unit_cost, 2.4);
    }

    #[test]
    fn reports_the_offending_line() {
        let err = build_request(Some(1), Some(2), "", &[line(Some(10), "5", "1"), line(None, "1", "1")])
            .unwrap_err();
        assert_eq!(err, "Line 2: choose a product");

        let err = build_request(Some(1), Some(2), "", &[line(Some(10), "0", "1")]).unwrap_err();
        assert_eq!(err, "Line 1: quantity must be positive");
    }

    #[test]
    fn header_fields_are_required() {
        assert_eq!(
            build_request(None, Some(2), "", &[line(Some(1), "1", "1")]).unwrap_err(),
            "Choose a supplier"
        );
        assert!(build_request(Some(1), Some(2), "31/12/2024", &[line(Some(1), "1", "1")]).is_err());
        assert_eq!(
            build_request(Some(1), Some(2), "", &[]).unwrap_err(),
            "Add at least one line"
        );
    }

    #[test]
    fn draft_total_skips_incomplete_rows() {
        let total = draft_total(&[line(Some(1), "2", "1.50"), line(Some(2), "", "9"), line(None, "1", "4")]);
        assert_eq!(total, 3.0);
    }
}
