//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Prices travel as JSON floats and are never negative
mod price {
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        if value < Decimal::ZERO {
            return Err(de::Error::custom(format!("price must not be negative, got {}", value)));
        }
        Ok(value)
    }
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Product group reference
    pub product_group_id: i64,
    #[serde(with = "price")]
    pub price: Decimal,
    pub stock_qty: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sku: Option<String>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub product_group_id: i64,
    #[serde(with = "price")]
    pub price: Decimal,
    pub stock_qty: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Variation option IDs, only accepted on create
    #[serde(default)]
    pub options: BTreeSet<i64>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_group_id: Option<i64>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_qty: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_integer_price() {
        let product: Product = serde_json::from_value(json!({
            "id": 10,
            "name": "Mug",
            "product_group_id": 2,
            "price": 1500,
            "stock_qty": 12,
            "description": "Stoneware",
            "sku": null
        }))
        .unwrap();
        assert_eq!(product.price, Decimal::from(1500));
        assert_eq!(product.stock_qty, 12);
        assert_eq!(product.sku, None);
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let result = serde_json::from_value::<Product>(json!({
            "id": 10,
            "name": "Mug",
            "product_group_id": 2,
            "price": 1,
            "stock_qty": -1,
            "description": ""
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let result = serde_json::from_value::<Product>(json!({
            "id": 10,
            "name": "Mug",
            "product_group_id": 2,
            "price": -0.5,
            "stock_qty": 1,
            "description": ""
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("price must not be negative"), "{}", err);
    }

    #[test]
    fn test_zero_price_is_accepted() {
        let product: Product = serde_json::from_value(json!({
            "id": 10,
            "name": "Sample",
            "product_group_id": 2,
            "price": 0,
            "stock_qty": 1
        }))
        .unwrap();
        assert!(product.price.is_zero());
    }

    #[test]
    fn test_create_serializes_options_as_array() {
        let create = ProductCreate {
            name: "Mug".into(),
            product_group_id: 2,
            price: Decimal::from(15),
            stock_qty: 3,
            description: String::new(),
            sku: None,
            options: BTreeSet::from([9, 4, 9]),
        };
        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(value["options"], json!([4, 9]));
        assert!(value.get("sku").is_none());
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = ProductUpdate {
            stock_qty: Some(0),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"stock_qty": 0}));
    }
}
