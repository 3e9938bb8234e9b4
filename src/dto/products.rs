use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use utoipa::ToSchema;

use crate::models::{Product, ProductFields, ValidationError};

/// Body of both create and update requests. Update is a full replacement,
/// so every field is required.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Widget", min_length = 1, max_length = 100)]
    pub name: String,
    #[schema(example = 9.99, minimum = 0)]
    pub price: f64,
    #[schema(example = 5, minimum = 0)]
    #[serde(deserialize_with = "whole_number")]
    pub stock: i64,
    #[schema(example = "tools", min_length = 1, max_length = 100)]
    pub category: String,
}

impl ProductInput {
    pub fn validate(self) -> Result<ProductFields, ValidationError> {
        ProductFields::new(self.name, self.price, self.stock, self.category)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
}

/// Integers, plus floats with no fractional part (`5.0`).
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Number::deserialize(deserializer)? {
        Number::Int(n) => Ok(n),
        Number::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        Number::Float(f) => Err(D::Error::custom(format!(
            "expected a whole number, got {f}"
        ))),
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductEnvelope {
    pub message: String,
    pub product: Product,
}

impl ProductEnvelope {
    pub fn new(message: impl Into<String>, product: Product) -> Self {
        Self {
            message: message.into(),
            product,
        }
    }
}
