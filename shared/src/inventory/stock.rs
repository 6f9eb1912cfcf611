//! Stock overview calculations

use serde::{Deserialize, Serialize};

use crate::models::{Product, Warehouse};
use crate::money;

/// Units of a product across the known warehouses
pub fn total_stock(product: &Product, warehouses: &[Warehouse]) -> i64 {
    warehouses.iter().map(|w| product.stock_in(w.id)).sum()
}

/// Products at or below the warehouse's low-stock threshold
pub fn low_stock<'a>(products: &'a [Product], warehouse: &Warehouse) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.stock_in(warehouse.id) <= warehouse.low_stock_threshold)
        .collect()
}

/// Case-insensitive name substring search (empty query matches everything)
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| needle.is_empty() || p.nombre.to_lowercase().contains(&needle))
        .collect()
}

/// Inventory value at cost and at sale price
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub units: i64,
    pub at_cost: f64,
    pub at_sale_price: f64,
}

/// Value the stock of one warehouse, or of all given warehouses
pub fn valuation(products: &[Product], warehouses: &[Warehouse], only: Option<i64>) -> Valuation {
    let mut units = 0;
    let mut cost = Vec::with_capacity(products.len());
    let mut sale = Vec::with_capacity(products.len());
    for p in products {
        let n = match only {
            Some(id) => p.stock_in(id),
            None => total_stock(p, warehouses),
        };
        units += n;
        cost.push(p.costo * n as f64);
        sale.push(p.sale_price() * n as f64);
    }
    Valuation {
        units,
        at_cost: money::sum(cost),
        at_sale_price: money::sum(sale),
    }
}

/// Merge the stock figure returned by `POST /productos/{id}/stock`
pub fn apply_stock_update(product: &mut Product, warehouse_id: i64, stock: i64) {
    product.stocks.insert(warehouse_id, stock);
}
