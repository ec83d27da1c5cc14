//! Every view that can be opened as a tab: its key, label, menu group and
//! the roles allowed to see it. The sidebar, the tab restorer and the page
//! renderer all read from `VIEWS`.

use contracts::system::auth::Role;
use leptos::prelude::*;

use crate::dashboards::OverviewDashboard;
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_warehouse::ui::list::WarehouseList;
use crate::domain::a003_supplier::ui::list::SupplierList;
use crate::domain::a004_inventory::ui::list::InventoryList;
use crate::domain::a004_inventory::ui::movements::MovementList;
use crate::domain::a005_purchase_order::ui::list::PurchaseOrderList;
use crate::domain::a006_sales_order::ui::list::SalesOrderList;
use crate::domain::a006_sales_order::ui::mine::MyOrders;
use crate::domain::a007_shipment::ui::list::ShipmentList;
use crate::domain::a008_carrier::ui::list::CarrierList;
use crate::system::auth::guard::RequireRole;
use crate::system::users::ui::list::UsersList;
use crate::usecases::u501_catalog_checkout::view::CatalogCheckout;

const ALL: &[Role] = &Role::ALL;
const STAFF: &[Role] = &Role::STAFF;
const CLIENT: &[Role] = &[Role::Client];
const ADMIN: &[Role] = &[Role::Admin];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuGroup {
    Overview,
    Shop,
    Stock,
    Purchasing,
    Sales,
    Administration,
}

impl MenuGroup {
    pub const ORDER: [MenuGroup; 6] = [
        MenuGroup::Overview,
        MenuGroup::Shop,
        MenuGroup::Stock,
        MenuGroup::Purchasing,
        MenuGroup::Sales,
        MenuGroup::Administration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuGroup::Overview => "Overview",
            MenuGroup::Shop => "Shop",
            MenuGroup::Stock => "Stock",
            MenuGroup::Purchasing => "Purchasing",
            MenuGroup::Sales => "Sales",
            MenuGroup::Administration => "Administration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub group: MenuGroup,
    pub roles: &'static [Role],
}

impl ViewEntry {
    pub fn allows(&self, roles: &[Role]) -> bool {
        self.roles.iter().any(|r| roles.contains(r))
    }
}

pub const OVERVIEW: &str = "overview";

pub const VIEWS: &[ViewEntry] = &[
    ViewEntry { key: OVERVIEW, label: "Overview", icon: "dashboard", group: MenuGroup::Overview, roles: ALL },
    ViewEntry { key: "catalog", label: "Catalog", icon: "cart", group: MenuGroup::Shop, roles: CLIENT },
    ViewEntry { key: "my_orders", label: "My orders", icon: "orders", group: MenuGroup::Shop, roles: CLIENT },
    ViewEntry { key: "products", label: "Products", icon: "products", group: MenuGroup::Stock, roles: STAFF },
    ViewEntry { key: "warehouses", label: "Warehouses", icon: "warehouse", group: MenuGroup::Stock, roles: STAFF },
    ViewEntry { key: "inventory", label: "Inventory", icon: "inventory", group: MenuGroup::Stock, roles: STAFF },
    ViewEntry { key: "movements", label: "Stock movements", icon: "movements", group: MenuGroup::Stock, roles: STAFF },
    ViewEntry { key: "suppliers", label: "Suppliers", icon: "suppliers", group: MenuGroup::Purchasing, roles: STAFF },
    ViewEntry { key: "purchase_orders", label: "Purchase orders", icon: "purchases", group: MenuGroup::Purchasing, roles: STAFF },
    ViewEntry { key: "sales_orders", label: "Sales orders", icon: "orders", group: MenuGroup::Sales, roles: STAFF },
    ViewEntry { key: "shipments", label: "Shipments", icon: "shipments", group: MenuGroup::Sales, roles: STAFF },
    ViewEntry { key: "carriers", label: "Carriers", icon: "carriers", group: MenuGroup::Administration, roles: ADMIN },
    ViewEntry { key: "users", label: "Users & roles", icon: "users", group: MenuGroup::Administration, roles: ADMIN },
];

pub fn find_view(key: &str) -> Option<&'static ViewEntry> {
    VIEWS.iter().find(|v| v.key == key)
}

/// Views of one menu group visible to a session holding `roles`.
pub fn visible_in(group: MenuGroup, roles: &[Role]) -> Vec<&'static ViewEntry> {
    VIEWS
        .iter()
        .filter(|v| v.group == group && v.allows(roles))
        .collect()
}

fn view_for(key: &str) -> AnyView {
    match key {
        OVERVIEW => view! { <OverviewDashboard /> }.into_any(),
        "catalog" => view! { <CatalogCheckout /> }.into_any(),
        "my_orders" => view! { <MyOrders /> }.into_any(),
        "products" => view! { <ProductList /> }.into_any(),
        "warehouses" => view! { <WarehouseList /> }.into_any(),
        "inventory" => view! { <InventoryList /> }.into_any(),
        "movements" => view! { <MovementList /> }.into_any(),
        "suppliers" => view! { <SupplierList /> }.into_any(),
        "purchase_orders" => view! { <PurchaseOrderList /> }.into_any(),
        "sales_orders" => view! { <SalesOrderList /> }.into_any(),
        "shipments" => view! { <ShipmentList /> }.into_any(),
        "carriers" => view! { <CarrierList /> }.into_any(),
        "users" => view! { <UsersList /> }.into_any(),
        _ => view! { <div class="placeholder">"Not implemented yet"</div> }.into_any(),
    }
}

/// Renders the page behind a tab key, guarded by the view's roles.
pub fn render_tab_content(key: &str) -> AnyView {
    let Some(entry) = find_view(key) else {
        log::warn!("Unknown tab type: {}", key);
        return view! { <div class="placeholder">"Unknown page"</div> }.into_any();
    };

    view! {
        <RequireRole roles=entry.roles.to_vec()>
            {view_for(entry.key)}
        </RequireRole>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_for(roles: &[Role]) -> Vec<&'static str> {
        VIEWS
            .iter()
            .filter(|v| v.allows(roles))
            .map(|v| v.key)
            .collect()
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in VIEWS.iter().enumerate() {
            assert!(
                VIEWS[i + 1..].iter().all(|b| b.key != a.key),
                "duplicate key {}",
                a.key
            );
        }
    }

    #[test]
    fn admin_sees_every_staff_view() {
        let keys = keys_for(&[Role::Admin]);
        for key in ["products", "warehouses", "inventory", "purchase_orders", "carriers", "users"] {
            assert!(keys.contains(&key), "admin is missing {}", key);
        }
        assert!(!keys.contains(&"catalog"));
    }

    #[test]
    fn warehouse_manager_has_no_administration() {
        let keys = keys_for(&[Role::WarehouseManager]);
        assert!(keys.contains(&"inventory"));
        assert!(keys.contains(&"shipments"));
        assert!(!keys.contains(&"carriers"));
        assert!(!keys.contains(&"users"));
        assert!(visible_in(MenuGroup::Administration, &[Role::WarehouseManager]).is_empty());
    }

    #[test]
    fn client_sees_only_shop_and_overview() {
        assert_eq!(keys_for(&[Role::Client]), vec![OVERVIEW, "catalog", "my_orders"]);
    }

    #[test]
    fn no_roles_sees_nothing() {
        assert!(keys_for(&[]).is_empty());
    }

    #[test]
    fn every_group_is_ordered() {
        for view in VIEWS {
            assert!(MenuGroup::ORDER.contains(&view.group));
        }
    }
}
