//! Estimate calculation
//!
//! Turns requested lines into priced lines and totals. The calculator holds
//! only a shared reference to the catalog and never mutates anything, so a
//! single instance can serve any number of concurrent requests.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::PriceCatalog;
use crate::lenient;
use crate::request::{EstimateRequest, LineItemRequest, RequestedTaxRate};

/// A priced row of an estimate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PricedLineItem {
    pub code: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "qty")]
    pub quantity: i64,
    pub line_total: i64,
}

impl PricedLineItem {
    /// Read a client-supplied row; each unreadable field falls back to
    /// empty text or zero on its own
    pub fn from_value(value: &Value) -> Self {
        Self {
            code: lenient::text_field(value, "code"),
            description: lenient::text_field(value, "desc"),
            quantity: lenient::amount_field(value, "qty"),
            line_total: lenient::amount_field(value, "line_total"),
        }
    }
}

impl<'de> Deserialize<'de> for PricedLineItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| Self::from_value(&v))
    }
}

/// Priced lines with totals
///
/// Also the body of `POST /api/estimate/pdf`, where every field is optional
/// and decoded independently. Entries of `lines` that are not objects are
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EstimateResult {
    pub lines: Vec<PricedLineItem>,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl EstimateResult {
    pub fn from_value(value: &Value) -> Self {
        let lines = value
            .get("lines")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .map(PricedLineItem::from_value)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            lines,
            subtotal: lenient::amount_field(value, "subtotal"),
            tax: lenient::amount_field(value, "tax"),
            total: lenient::amount_field(value, "total"),
        }
    }
}

impl<'de> Deserialize<'de> for EstimateResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| Self::from_value(&v))
    }
}

/// Largest subtotal accepted; with a rate of at most 100% the total still fits
pub const MAX_SUBTOTAL: i64 = i64::MAX / 4;

/// Consumption tax rate applied to the subtotal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRate(f64);

impl TaxRate {
    pub const DEFAULT: TaxRate = TaxRate(0.10);

    /// Accepts rates from 0 to 1 inclusive
    pub fn new(rate: f64) -> Option<Self> {
        (0.0..=1.0).contains(&rate).then_some(Self(rate))
    }

    /// Resolve a client-supplied rate, falling back to the default
    pub fn from_requested(requested: RequestedTaxRate) -> Self {
        match requested {
            RequestedTaxRate::Missing => Self::DEFAULT,
            RequestedTaxRate::Rate(rate) => Self::new(rate).unwrap_or_else(|| {
                warn!("Tax rate {} out of range, using default", rate);
                Self::DEFAULT
            }),
            RequestedTaxRate::Invalid => {
                warn!("Tax rate is not a number, using default");
                Self::DEFAULT
            }
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Tax on `subtotal`, truncated to whole yen
    pub fn tax_on(self, subtotal: i64) -> i64 {
        (subtotal as f64 * self.0).floor() as i64
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Prices requested lines against a catalog
#[derive(Debug, Clone, Copy)]
pub struct EstimateCalculator<'a> {
    catalog: &'a PriceCatalog,
}

impl<'a> EstimateCalculator<'a> {
    pub fn new(catalog: &'a PriceCatalog) -> Self {
        Self { catalog }
    }

    pub fn calculate_request(&self, request: &EstimateRequest) -> EstimateResult {
        self.calculate(TaxRate::from_requested(request.tax_rate), &request.lines)
    }

    /// Price `lines` in order.
    ///
    /// Lines with a missing or unknown code, a non-positive quantity, or an
    /// amount that would push the subtotal past [`MAX_SUBTOTAL`] are left out
    /// of the result.
    pub fn calculate(&self, tax_rate: TaxRate, lines: &[LineItemRequest]) -> EstimateResult {
        let mut priced = Vec::with_capacity(lines.len());
        let mut subtotal: i64 = 0;

        for line in lines {
            let Some(code) = line.code.as_deref() else {
                debug!("Skipping line without code");
                continue;
            };
            let Some(entry) = self.catalog.lookup(code) else {
                debug!("Skipping unknown code {}", code);
                continue;
            };
            let Some(quantity) = line.quantity.resolve() else {
                debug!("Rejecting {} with quantity {:?}", code, line.quantity);
                continue;
            };
            let Some((line_total, next_subtotal)) = entry
                .unit_price
                .checked_mul(quantity)
                .and_then(|t| subtotal.checked_add(t).map(|s| (t, s)))
                .filter(|(_, s)| *s <= MAX_SUBTOTAL)
            else {
                warn!("Skipping {} x {}: amount overflow", code, quantity);
                continue;
            };

            subtotal = next_subtotal;
            priced.push(PricedLineItem {
                code: entry.code.clone(),
                description: entry.description.clone(),
                quantity,
                line_total,
            });
        }

        let tax = tax_rate.tax_on(subtotal);
        EstimateResult {
            lines: priced,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
