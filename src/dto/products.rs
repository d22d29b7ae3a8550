use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// A fully validated creation payload, produced by `ProductSchema::load_create`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[serde(rename = "nome")]
    #[schema(example = "Smartphone Samsung Galaxy S21")]
    pub name: String,
    #[serde(rename = "preco")]
    #[schema(value_type = String, example = "3500.00")]
    pub price: Decimal,
    #[serde(rename = "quantidade_estoque")]
    #[schema(example = 50)]
    pub stock_quantity: i32,
    #[serde(rename = "codigo_barras")]
    #[schema(example = "9876543210987")]
    pub barcode: Option<String>,
    #[serde(rename = "unidade_medida")]
    #[schema(example = "unidade")]
    pub unit_of_measure: Option<String>,
}

/// Partial update. `None` leaves the stored value untouched; for the nullable
/// columns `Some(None)` clears the value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 255, message = "Length must be between 1 and 255."))]
    #[schema(example = "Smartphone Samsung Galaxy S22")]
    pub name: Option<String>,
    #[serde(rename = "preco")]
    #[schema(value_type = Option<String>, example = "4500.00")]
    pub price: Option<Decimal>,
    #[serde(rename = "quantidade_estoque")]
    #[validate(range(min = 0, message = "Must be greater than or equal to 0."))]
    #[schema(example = 30)]
    pub stock_quantity: Option<i32>,
    #[serde(rename = "codigo_barras")]
    #[schema(value_type = Option<String>, example = "1234567890123")]
    pub barcode: Option<Option<String>>,
    #[serde(rename = "unidade_medida")]
    #[schema(value_type = Option<String>, example = "unidade")]
    pub unit_of_measure: Option<Option<String>>,
}

/// Inclusive price bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}
