//! Shopping cart of the client catalog. Lives for the browser session only.

use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a006_sales_order::aggregate::SalesOrderLineRequest;
use contracts::shared::EntityId;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: EntityId,
    pub sku: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl CartLine {
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Lines keyed by product id, kept in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, product_id: EntityId) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Adding a product already in the cart increases its quantity.
    pub fn add(&mut self, product: &Product, quantity: i64) {
        if quantity <= 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine {
                product_id: product.id,
                sku: product.sku.clone(),
                name: product.name.clone(),
                unit_price: product.unit_price,
                quantity,
            }),
        }
    }

    /// A quantity of zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: EntityId, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, product_id: EntityId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::amount).sum()
    }

    pub fn to_order_lines(&self) -> Vec<SalesOrderLineRequest> {
        self.lines
            .iter()
            .map(|l| SalesOrderLineRequest {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect()
    }
}

/// Session-wide cart, provided once at the application root so it survives
/// closing the catalog tab.
#[derive(Clone, Copy)]
pub struct CartStore(pub RwSignal<Cart>);

impl CartStore {
    pub fn new() -> Self {
        Self(RwSignal::new(Cart::default()))
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_cart() -> RwSignal<Cart> {
    use_context::<CartStore>()
        .expect("CartStore not provided in context")
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: EntityId, price: f64) -> Product {
        Product {
            id,
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            unit_price: price,
            unit: "pcs".into(),
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn adding_again_increases_quantity() {
        let mut cart = Cart::default();
        cart.add(&product(1, 2.0), 1);
        cart.add(&product(1, 2.0), 2);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(1), 3);
    }

    #[test]
    fn zero_quantity_removes_line() {
        let mut cart = Cart::default();
        cart.add(&product(1, 2.0), 1);
        cart.add(&product(2, 3.0), 1);
        cart.set_quantity(1, 0);
        assert_eq!(cart.quantity_of(1), 0);
        assert_eq!(cart.lines().len(), 1);
        cart.set_quantity(99, 4);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut cart = Cart::default();
        cart.add(&product(3, 1.0), 1);
        cart.add(&product(1, 1.0), 1);
        cart.add(&product(2, 1.0), 1);
        cart.add(&product(3, 1.0), 5);
        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn totals_and_order_lines() {
        let mut cart = Cart::default();
        cart.add(&product(1, 2.5), 2);
        cart.add(&product(2, 10.0), 1);
        cart.add(&product(3, 1.0), 0);
        assert_eq!(cart.total(), 15.0);
        assert_eq!(cart.item_count(), 3);
        let lines = cart.to_order_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].product_id, lines[0].quantity), (1, 2));
        cart.clear();
        assert!(cart.is_empty());
    }
}
