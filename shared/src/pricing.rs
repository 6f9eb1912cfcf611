//! Product and price-list pricing
//!
//! All math in `Decimal`, results rounded to 2 dp on the way out.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{PriceList, Product};
use crate::money::{to_decimal, to_f64};

/// IVA rate applied to price-list prices, in percentage
pub const PRICE_LIST_IVA_PERCENT: f64 = 5.0;

fn percent_of(base: Decimal, percent: Decimal) -> Decimal {
    base * percent / Decimal::ONE_HUNDRED
}

/// `base + base * iva / 100 + ipo`
pub fn sale_price(base: f64, iva_percent: f64, ipo: f64) -> f64 {
    let base = to_decimal(base);
    to_f64(base + percent_of(base, to_decimal(iva_percent)) + to_decimal(ipo))
}

/// `base * iva / 100`
pub fn iva_amount(base: f64, iva_percent: f64) -> f64 {
    to_f64(percent_of(to_decimal(base), to_decimal(iva_percent)))
}

/// IPO surcharge expressed as a percentage of base (0 when base is 0)
pub fn ipo_percent(base: f64, ipo: f64) -> f64 {
    let base = to_decimal(base);
    if base.is_zero() {
        return 0.0;
    }
    to_f64(to_decimal(ipo) / base * Decimal::ONE_HUNDRED)
}

/// `base - base * discount / 100`
pub fn discounted_price(base: f64, discount_percent: f64) -> f64 {
    let base = to_decimal(base);
    to_f64(base - percent_of(base, to_decimal(discount_percent)))
}

/// One row of a price list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceListRow {
    pub product_id: i64,
    pub product_name: String,
    pub base: f64,
    pub discounted: f64,
    /// IVA at the fixed price-list rate over the discounted price
    pub iva: f64,
    pub ipo: f64,
    /// `discounted + iva + ipo`
    pub total: f64,
}

pub fn price_list_row(product: &Product, list: &PriceList) -> PriceListRow {
    let discounted = to_decimal(discounted_price(product.precio_base, list.descuento));
    let iva = percent_of(discounted, to_decimal(PRICE_LIST_IVA_PERCENT));
    let ipo = to_decimal(product.ipo);
    PriceListRow {
        product_id: product.id,
        product_name: product.nombre.clone(),
        base: product.precio_base,
        discounted: to_f64(discounted),
        iva: to_f64(iva),
        ipo: to_f64(ipo),
        total: to_f64(discounted + iva + ipo),
    }
}

/// Price every product under a list
pub fn price_list_table(products: &[Product], list: &PriceList) -> Vec<PriceListRow> {
    products.iter().map(|p| price_list_row(p, list)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_price() {
        assert_eq!(sale_price(1000.0, 19.0, 0.0), 1190.0);
        assert_eq!(sale_price(40000.0, 19.0, 2500.0), 50100.0);
        assert_eq!(sale_price(0.0, 19.0, 300.0), 300.0);
    }

    #[test]
    fn test_iva_and_ipo_percent() {
        assert_eq!(iva_amount(1000.0, 19.0), 190.0);
        assert_eq!(ipo_percent(40000.0, 2500.0), 6.25);
        assert_eq!(ipo_percent(0.0, 2500.0), 0.0);
        assert_eq!(ipo_percent(3.0, 1.0), 33.33);
    }

    #[test]
    fn test_discounted_price() {
        assert_eq!(discounted_price(1000.0, 15.0), 850.0);
        assert_eq!(discounted_price(1000.0, 0.0), 1000.0);
        assert_eq!(discounted_price(999.99, 10.0), 899.99);
    }

    #[test]
    fn test_price_list_row() {
        let product = Product {
            id: 3,
            nombre: "Ron".into(),
            precio_base: 10000.0,
            ipo: 500.0,
            ..Default::default()
        };
        let list = PriceList {
            id: 1,
            nombre: "Mayoristas".into(),
            descuento: 10.0,
        };
        let row = price_list_row(&product, &list);
        assert_eq!(row.discounted, 9000.0);
        assert_eq!(row.iva, 450.0);
        assert_eq!(row.total, 9950.0);
    }
}
