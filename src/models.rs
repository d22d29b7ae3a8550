use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::products::Model as ProductModel;

/// Output representation of a product. Every field is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i32,
    #[serde(rename = "nome")]
    #[schema(example = "Smartphone Samsung Galaxy S21")]
    pub name: String,
    #[serde(rename = "preco", with = "rust_decimal::serde::str")]
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
    #[serde(rename = "data_cadastro")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "data_atualizacao")]
    pub updated_at: DateTime<Utc>,
}

impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: Decimal::new(model.price_cents, 2),
            stock_quantity: model.stock_quantity,
            barcode: model.barcode,
            unit_of_measure: model.unit_of_measure,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
