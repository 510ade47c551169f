//! Estimate request types with lenient decoding
//!
//! Client input is decoded field by field so that a bad value only affects
//! the field it sits in:
//!
//! - `code` that is missing or not a string leaves the line without a code
//!   (the calculator skips it)
//! - `qty` that is missing or null counts as 1; integers are taken as is,
//!   floats are truncated toward zero, numeric strings are parsed with the
//!   same rules, and any other value counts as 1
//! - `tax_rate` that is missing uses the default; a value that is not a
//!   number is kept as `Invalid` so the calculator can report it
//! - `lines` that is not an array decodes as no lines

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::lenient;

/// Body of `POST /api/estimate/generate`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub tax_rate: RequestedTaxRate,
    #[serde(default, deserialize_with = "lenient_lines")]
    pub lines: Vec<LineItemRequest>,
}

/// One requested line: a catalog code and a quantity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemRequest {
    pub code: Option<String>,
    pub quantity: RequestedQuantity,
}

impl LineItemRequest {
    pub fn new(code: impl Into<String>, quantity: i64) -> Self {
        Self {
            code: Some(code.into()),
            quantity: RequestedQuantity::Count(quantity),
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self {
                code: map.get("code").and_then(Value::as_str).map(str::to_string),
                quantity: map
                    .get("qty")
                    .map(RequestedQuantity::from_value)
                    .unwrap_or_default(),
            },
            _ => Self::default(),
        }
    }
}

impl<'de> Deserialize<'de> for LineItemRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

fn lenient_lines<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<LineItemRequest>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(LineItemRequest::from_value).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Quantity as the client sent it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestedQuantity {
    #[default]
    Missing,
    Count(i64),
    Invalid,
}

impl RequestedQuantity {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            other => lenient::integer(other).map_or(Self::Invalid, Self::Count),
        }
    }

    /// Effective quantity, or `None` when the line must be rejected
    pub fn resolve(self) -> Option<i64> {
        match self {
            Self::Missing | Self::Invalid => Some(1),
            Self::Count(n) if n > 0 => Some(n),
            Self::Count(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for RequestedQuantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| Self::from_value(&v))
    }
}

/// Tax rate as the client sent it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum RequestedTaxRate {
    #[default]
    Missing,
    Rate(f64),
    Invalid,
}

impl RequestedTaxRate {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(n) => n.as_f64().map_or(Self::Invalid, Self::Rate),
            Value::String(s) => s.trim().parse().map_or(Self::Invalid, Self::Rate),
            _ => Self::Invalid,
        }
    }
}

impl<'de> Deserialize<'de> for RequestedTaxRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| Self::from_value(&v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: Value) -> EstimateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_request() {
        let req = parse(json!({
            "tax_rate": 0.08,
            "lines": [{"code": "K-01", "qty": 1}, {"code": "T-01", "qty": 2}]
        }));
        assert_eq!(req.tax_rate, RequestedTaxRate::Rate(0.08));
        assert_eq!(
            req.lines,
            vec![LineItemRequest::new("K-01", 1), LineItemRequest::new("T-01", 2)]
        );
    }

    #[test]
    fn test_empty_object_defaults() {
        let req = parse(json!({}));
        assert_eq!(req, EstimateRequest::default());
    }

    #[test]
    fn test_quantity_decoding() {
        let q = |v: Value| RequestedQuantity::from_value(&v);
        assert_eq!(q(json!(3)), RequestedQuantity::Count(3));
        assert_eq!(q(json!(2.9)), RequestedQuantity::Count(2));
        assert_eq!(q(json!("4")), RequestedQuantity::Count(4));
        assert_eq!(q(json!(" 5.5 ")), RequestedQuantity::Count(5));
        assert_eq!(q(json!(-2)), RequestedQuantity::Count(-2));
        assert_eq!(q(json!(null)), RequestedQuantity::Missing);
        assert_eq!(q(json!("two")), RequestedQuantity::Invalid);
        assert_eq!(q(json!(true)), RequestedQuantity::Invalid);
        assert_eq!(q(json!({"n": 1})), RequestedQuantity::Invalid);
        assert_eq!(q(json!(1e300)), RequestedQuantity::Invalid);
    }

    #[test]
    fn test_quantity_resolution() {
        assert_eq!(RequestedQuantity::Missing.resolve(), Some(1));
        assert_eq!(RequestedQuantity::Invalid.resolve(), Some(1));
        assert_eq!(RequestedQuantity::Count(7).resolve(), Some(7));
        assert_eq!(RequestedQuantity::Count(0).resolve(), None);
        assert_eq!(RequestedQuantity::Count(-1).resolve(), None);
    }

    #[test]
    fn test_missing_qty_and_bad_code() {
        let req = parse(json!({"lines": [{"code": "K-02"}, {"code": 12, "qty": 1}, "junk"]}));
        assert_eq!(req.lines.len(), 3);
        assert_eq!(req.lines[0].code.as_deref(), Some("K-02"));
        assert_eq!(req.lines[0].quantity, RequestedQuantity::Missing);
        assert_eq!(req.lines[1].code, None);
        assert_eq!(req.lines[2], LineItemRequest::default());
    }

    #[test]
    fn test_non_array_lines() {
        let req = parse(json!({"lines": "K-01"}));
        assert!(req.lines.is_empty());
    }

    #[test]
    fn test_tax_rate_decoding() {
        assert_eq!(parse(json!({"tax_rate": "0.1"})).tax_rate, RequestedTaxRate::Rate(0.1));
        assert_eq!(parse(json!({"tax_rate": null})).tax_rate, RequestedTaxRate::Missing);
        assert_eq!(parse(json!({"tax_rate": [1]})).tax_rate, RequestedTaxRate::Invalid);
    }
}
