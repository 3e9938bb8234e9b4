use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Width of the `name` and `category` columns.
pub const MAX_TEXT_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
}

impl Product {
    pub fn new(id: Uuid, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            stock: fields.stock,
            category: fields.category,
        }
    }

    /// Full replacement of every field except `id`.
    pub fn replace(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.price = fields.price;
        self.stock = fields.stock;
        self.category = fields.category;
    }
}

/// The mutable part of a product, already checked against every field rule.
///
/// Only [`ProductFields::new`] builds one, so anything a repository is asked
/// to store has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    name: String,
    price: f64,
    stock: i32,
    category: String,
}

impl ProductFields {
    pub fn new(
        name: String,
        price: f64,
        stock: i64,
        category: String,
    ) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        if name.is_empty() {
            violations.push(Violation::EmptyName);
        } else if name.chars().count() > MAX_TEXT_LEN {
            violations.push(Violation::NameTooLong);
        }

        if !price.is_finite() {
            violations.push(Violation::NonFinitePrice);
        } else if price < 0.0 {
            violations.push(Violation::NegativePrice);
        }

        if stock < 0 {
            violations.push(Violation::NegativeStock);
        } else if stock > i64::from(i32::MAX) {
            violations.push(Violation::StockOutOfRange);
        }

        if category.is_empty() {
            violations.push(Violation::EmptyCategory);
        } else if category.chars().count() > MAX_TEXT_LEN {
            violations.push(Violation::CategoryTooLong);
        }

        if !violations.is_empty() {
            return Err(ValidationError { violations });
        }

        Ok(Self {
            name,
            price,
            // range checked above
            stock: stock as i32,
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most 100 characters")]
    NameTooLong,
    #[error("price must be greater than or equal to 0")]
    NegativePrice,
    #[error("price must be a finite number")]
    NonFinitePrice,
    #[error("stock must be greater than or equal to 0")]
    NegativeStock,
    #[error("stock is too large")]
    StockOutOfRange,
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("category must be at most 100 characters")]
    CategoryTooLong,
}

impl Violation {
    pub fn field(&self) -> &'static str {
        match self {
            Violation::EmptyName | Violation::NameTooLong => "name",
            Violation::NegativePrice | Violation::NonFinitePrice => "price",
            Violation::NegativeStock | Violation::StockOutOfRange => "stock",
            Violation::EmptyCategory | Violation::CategoryTooLong => "category",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
