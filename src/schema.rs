use std::{collections::BTreeMap, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};
use validator::Validate;

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::products::Model as ProductModel,
    models::Product,
};

/// Field name -> messages, keyed by wire name. Empty means the input is acceptable.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const NAME: &str = "nome";
pub const PRICE: &str = "preco";
pub const STOCK_QUANTITY: &str = "quantidade_estoque";
pub const BARCODE: &str = "codigo_barras";
pub const UNIT_OF_MEASURE: &str = "unidade_medida";
/// Key for errors about the payload as a whole.
pub const SCHEMA: &str = "_schema";

const LOADABLE: [&str; 5] = [NAME, PRICE, STOCK_QUANTITY, BARCODE, UNIT_OF_MEASURE];
const REQUIRED: [&str; 3] = [NAME, PRICE, STOCK_QUANTITY];

pub const INVALID_INPUT: &str = "Invalid input type.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";
pub const MISSING: &str = "Missing data for required field.";
pub const NOT_NULL: &str = "Field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_A_NUMBER: &str = "Not a valid number.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer.";
pub const NEGATIVE: &str = "Must be greater than or equal to 0.";
pub const TOO_MANY_DIGITS: &str = "Ensure that there are no more than 10 digits.";

/// Validation and serialization rules for the product representation.
///
/// Stateless; one instance is built at startup and carried in `AppState`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductSchema;

impl ProductSchema {
    pub fn new() -> Self {
        Self
    }

    /// Check `input` without producing a typed value. With `partial` set the
    /// required-field checks are waived.
    pub fn validate(&self, input: &Value, partial: bool) -> FieldErrors {
        let outcome = if partial {
            self.load_update(input).map(|_| ())
        } else {
            self.load_create(input).map(|_| ())
        };
        outcome.err().unwrap_or_default()
    }

    pub fn load_create(&self, input: &Value) -> Result<CreateProductRequest, FieldErrors> {
        match self.load(input, false)? {
            UpdateProductRequest {
                name: Some(name),
                price: Some(price),
                stock_quantity: Some(stock_quantity),
                barcode,
                unit_of_measure,
            } => Ok(CreateProductRequest {
                name,
                price,
                stock_quantity,
                barcode: barcode.flatten(),
                unit_of_measure: unit_of_measure.flatten(),
            }),
            // Full mode already rejected missing and null required fields.
            _ => Err(single(SCHEMA, INVALID_INPUT)),
        }
    }

    pub fn load_update(&self, input: &Value) -> Result<UpdateProductRequest, FieldErrors> {
        self.load(input, true)
    }

    pub fn dump(&self, model: ProductModel) -> Product {
        Product::from(model)
    }

    pub fn dump_many(&self, models: Vec<ProductModel>) -> Vec<Product> {
        models.into_iter().map(|m| self.dump(m)).collect()
    }

    fn load(&self, input: &Value, partial: bool) -> Result<UpdateProductRequest, FieldErrors> {
        let Some(map) = input.as_object() else {
            return Err(single(SCHEMA, INVALID_INPUT));
        };

        let mut errors = FieldErrors::new();
        for key in map.keys().filter(|k| !LOADABLE.contains(&k.as_str())) {
            push(&mut errors, key, UNKNOWN_FIELD);
        }
        if !partial {
            for field in REQUIRED.iter().filter(|f| !map.contains_key(**f)) {
                push(&mut errors, field, MISSING);
            }
        }

        let patch = UpdateProductRequest {
            name: required(map, NAME, parse_string, &mut errors),
            price: required(map, PRICE, parse_price, &mut errors),
            stock_quantity: required(map, STOCK_QUANTITY, parse_integer, &mut errors),
            barcode: nullable(map, BARCODE, parse_string, &mut errors),
            unit_of_measure: nullable(map, UNIT_OF_MEASURE, parse_string, &mut errors),
        };

        if let Err(report) = patch.validate() {
            for (field, failures) in report.field_errors() {
                for failure in failures.iter() {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string());
                    push(&mut errors, wire_name(&field), message);
                }
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

type Parser<T> = fn(&Value) -> Result<T, &'static str>;

fn required<T>(
    map: &Map<String, Value>,
    key: &str,
    parse: Parser<T>,
    errors: &mut FieldErrors,
) -> Option<T> {
    match map.get(key)? {
        Value::Null => {
            push(errors, key, NOT_NULL);
            None
        }
        value => parse(value).map_err(|msg| push(errors, key, msg)).ok(),
    }
}

fn nullable<T>(
    map: &Map<String, Value>,
    key: &str,
    parse: Parser<T>,
    errors: &mut FieldErrors,
) -> Option<Option<T>> {
    match map.get(key)? {
        Value::Null => Some(None),
        value => parse(value)
            .map(Some)
            .map_err(|msg| push(errors, key, msg))
            .ok(),
    }
}

fn parse_string(value: &Value) -> Result<String, &'static str> {
    value.as_str().map(str::to_owned).ok_or(NOT_A_STRING)
}

fn parse_price(value: &Value) -> Result<Decimal, &'static str> {
    let parsed = match value {
        Value::String(text) => decimal_from_text(text.trim()),
        Value::Number(number) => decimal_from_text(&number.to_string()),
        _ => None,
    };
    let price = parsed
        .ok_or(NOT_A_NUMBER)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if price < Decimal::ZERO {
        return Err(NEGATIVE);
    }
    // NUMERIC(10, 2): eight digits before the point.
    if price >= Decimal::from(100_000_000_i64) {
        return Err(TOO_MANY_DIGITS);
    }
    Ok(price)
}

fn decimal_from_text(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn parse_integer(value: &Value) -> Result<i32, &'static str> {
    let wide = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    wide.and_then(|n| i32::try_from(n).ok())
        .ok_or(NOT_AN_INTEGER)
}

fn wire_name(field: &str) -> &str {
    match field {
        "name" => NAME,
        "price" => PRICE,
        "stock_quantity" => STOCK_QUANTITY,
        "barcode" => BARCODE,
        "unit_of_measure" => UNIT_OF_MEASURE,
        other => other,
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

fn single(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    push(&mut errors, field, message);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> ProductSchema {
        ProductSchema::new()
    }

    #[test]
    fn full_load_accepts_minimal_product() {
        let req = schema()
            .load_create(&json!({
                "nome": "Mouse",
                "preco": "50.00",
                "quantidade_estoque": 10,
                "unidade_medida": "unidade"
            }))
            .expect("valid payload");

        assert_eq!(req.name, "Mouse");
        assert_eq!(req.price, Decimal::new(5000, 2));
        assert_eq!(req.stock_quantity, 10);
        assert_eq!(req.barcode, None);
        assert_eq!(req.unit_of_measure.as_deref(), Some("unidade"));
    }

    #[test]
    fn full_validation_reports_every_missing_field() {
        let errors = schema().validate(&json!({}), false);

        assert_eq!(errors.len(), 3);
        for field in [NAME, PRICE, STOCK_QUANTITY] {
            assert_eq!(errors[field], vec![MISSING.to_string()]);
        }
    }

    #[test]
    fn partial_validation_waives_required_fields() {
        assert!(schema().validate(&json!({}), true).is_empty());
        assert!(schema().validate(&json!({ "quantidade_estoque": 3 }), true).is_empty());
    }

    #[test]
    fn type_errors_are_reported_per_field() {
        let errors = schema().validate(
            &json!({
                "nome": 42,
                "preco": "abc",
                "quantidade_estoque": "ten",
                "codigo_barras": false
            }),
            false,
        );

        assert_eq!(errors[NAME], vec![NOT_A_STRING.to_string()]);
        assert_eq!(errors[PRICE], vec![NOT_A_NUMBER.to_string()]);
        assert_eq!(errors[STOCK_QUANTITY], vec![NOT_AN_INTEGER.to_string()]);
        assert_eq!(errors[BARCODE], vec![NOT_A_STRING.to_string()]);
    }

    #[test]
    fn read_only_and_unknown_keys_are_rejected() {
        let errors = schema().validate(
            &json!({ "id": 7, "data_cadastro": "2025-01-01T00:00:00Z", "cor": "azul" }),
            true,
        );

        assert_eq!(errors["id"], vec![UNKNOWN_FIELD.to_string()]);
        assert_eq!(errors["data_cadastro"], vec![UNKNOWN_FIELD.to_string()]);
        assert_eq!(errors["cor"], vec![UNKNOWN_FIELD.to_string()]);
    }

    #[test]
    fn non_object_body_is_a_schema_error() {
        let errors = schema().validate(&json!(["nome"]), false);
        assert_eq!(errors[SCHEMA], vec![INVALID_INPUT.to_string()]);
    }

    #[test]
    fn negative_values_are_rejected() {
        let errors = schema().validate(&json!({ "preco": -1, "quantidade_estoque": -5 }), true);

        assert_eq!(errors[PRICE], vec![NEGATIVE.to_string()]);
        assert_eq!(errors[STOCK_QUANTITY], vec![NEGATIVE.to_string()]);
    }

    #[test]
    fn empty_name_is_rejected() {
        let errors = schema().validate(&json!({ "nome": "" }), true);
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec![NAME]);
    }

    #[test]
    fn price_accepts_numbers_and_rounds_to_cents() {
        let patch = schema()
            .load_update(&json!({ "preco": 3500.0 }))
            .expect("numeric price");
        assert_eq!(patch.price, Some(Decimal::new(350000, 2)));

        let patch = schema()
            .load_update(&json!({ "preco": "19.995" }))
            .expect("string price");
        assert_eq!(patch.price, Some(Decimal::new(2000, 2)));

        let errors = schema().validate(&json!({ "preco": "100000000" }), true);
        assert_eq!(errors[PRICE], vec![TOO_MANY_DIGITS.to_string()]);
    }

    #[test]
    fn null_clears_optional_fields_but_not_required_ones() {
        let patch = schema()
            .load_update(&json!({ "codigo_barras": null, "unidade_medida": null }))
            .expect("nullable fields");
        assert_eq!(patch.barcode, Some(None));
        assert_eq!(patch.unit_of_measure, Some(None));

        let errors = schema().validate(&json!({ "nome": null }), true);
        assert_eq!(errors[NAME], vec![NOT_NULL.to_string()]);
    }

    #[test]
    fn omitted_fields_stay_absent_in_patch() {
        let patch = schema()
            .load_update(&json!({ "nome": "Teclado" }))
            .expect("partial payload");

        assert_eq!(patch.name.as_deref(), Some("Teclado"));
        assert!(patch.price.is_none());
        assert!(patch.stock_quantity.is_none());
        assert!(patch.barcode.is_none());
        assert!(patch.unit_of_measure.is_none());
    }
}
