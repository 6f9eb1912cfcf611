//! Price List Model

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};

/// Price list: a percentage discount over base prices for a client segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceList {
    pub id: i64,
    pub nombre: String,
    /// Discount in percentage (e.g., 15 = 15%)
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub descuento: f64,
}

/// Create / update price list payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceListInput {
    pub nombre: String,
    pub descuento: f64,
    /// Filled from the logged-in session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub establecimiento: Option<String>,
}

impl PriceListInput {
    /// Validate name and discount range (0..=100)
    pub fn validate(&self) -> AppResult<()> {
        if self.nombre.trim().is_empty() {
            return Err(AppError::required("nombre"));
        }
        if !self.descuento.is_finite() || !(0.0..=100.0).contains(&self.descuento) {
            return Err(AppError::new(ErrorCode::PriceListDiscountInvalid)
                .with_detail("descuento", self.descuento));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_discount_range() {
        let ok = PriceListInput {
            nombre: "Mayoristas".into(),
            descuento: 15.0,
            establecimiento: None,
        };
        assert!(ok.validate().is_ok());

        let too_high = PriceListInput {
            descuento: 120.0,
            ..ok.clone()
        };
        assert_eq!(
            too_high.validate().unwrap_err().code,
            ErrorCode::PriceListDiscountInvalid
        );

        let blank = PriceListInput {
            nombre: " ".into(),
            ..ok
        };
        assert_eq!(blank.validate().unwrap_err().code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_discount_as_string() {
        let list: PriceList =
            serde_json::from_str(r#"{"id": 1, "nombre": "VIP", "descuento": "10"}"#).unwrap();
        assert_eq!(list.descuento, 10.0);
    }
}
