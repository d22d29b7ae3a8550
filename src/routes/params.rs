use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::dto::products::PriceRange;

/// Raw `min_preco` / `max_preco` query values. Values that do not parse as a
/// finite float are ignored rather than rejected.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PriceRangeQuery {
    #[schema(example = "1000")]
    pub min_preco: Option<String>,
    #[schema(example = "3000")]
    pub max_preco: Option<String>,
}

impl PriceRangeQuery {
    pub fn bounds(&self) -> PriceRange {
        PriceRange {
            min: parse_bound("min_preco", self.min_preco.as_deref()),
            max: parse_bound("max_preco", self.max_preco.as_deref()),
        }
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Option<Decimal> {
    let raw = raw?;
    let Some(value) = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()) else {
        tracing::debug!(param = name, value = raw, "ignoring unparseable price bound");
        return None;
    };
    // Out of Decimal's range: saturate so the bound keeps its side, or collapse to zero.
    let bound = Decimal::from_f64(value).unwrap_or(if value.abs() < 1.0 {
        Decimal::ZERO
    } else if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    });
    Some(bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(min: Option<&str>, max: Option<&str>) -> PriceRangeQuery {
        PriceRangeQuery {
            min_preco: min.map(str::to_owned),
            max_preco: max.map(str::to_owned),
        }
    }

    #[test]
    fn parses_both_bounds() {
        let range = query(Some("1000"), Some("3000.5")).bounds();
        assert_eq!(range.min, Some(Decimal::from(1000)));
        assert_eq!(range.max, Some(Decimal::new(30005, 1)));
    }

    #[test]
    fn garbage_and_non_finite_values_are_ignored() {
        let range = query(Some("abc"), Some("inf")).bounds();
        assert_eq!(range, PriceRange::default());

        let range = query(Some(""), None).bounds();
        assert_eq!(range.min, None);
    }

    #[test]
    fn out_of_range_bounds_saturate() {
        let range = query(Some("1e29"), Some("-1e40")).bounds();
        assert_eq!(range.min, Some(Decimal::MAX));
        assert_eq!(range.max, Some(Decimal::MIN));
    }
}
