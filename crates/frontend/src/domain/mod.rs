pub mod a001_product;
pub mod a002_warehouse;
pub mod a003_supplier;
pub mod a004_inventory;
pub mod a005_purchase_order;
pub mod a006_sales_order;
pub mod a007_shipment;
pub mod a008_carrier;
