//! Derived figures: net worth, category totals, the per-record trend and the five year
//! projection.
//!
//! Everything here is a pure function of the record slice and is recomputed from scratch on
//! every render. Amounts that do not coerce to a number are `NaN` and poison any sum they are
//! part of; that is intended.

use crate::model::{serialize_number, Record};
use serde::Serialize;

/// Growth rate, in percent, assumed for a record whose growth is blank, zero or not a number.
pub const DEFAULT_GROWTH_RATE: f64 = 5.0;

/// The projection covers year offsets `0..=PROJECTION_YEARS`.
pub const PROJECTION_YEARS: u32 = 5;

/// Sum of every record's amount. An empty ledger is worth `0`.
pub fn net_worth(records: &[Record]) -> f64 {
    records.iter().map(Record::amount_value).fold(0.0, |total, amount| total + amount)
}

/// Total amount for one category label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(serialize_with = "serialize_number")]
    pub total: f64,
}

/// Sums amounts per `type`, keyed by the exact label. Categories appear in the order their
/// first record appears.
pub fn category_totals(records: &[Record]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for record in records {
        match totals.iter_mut().find(|t| t.category == record.kind()) {
            Some(existing) => existing.total += record.amount_value(),
            None => totals.push(CategoryTotal {
                category: record.kind().to_string(),
                total: record.amount_value(),
            }),
        }
    }
    totals
}

/// One point of the amount-over-time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// The record's date label.
    pub label: String,
    #[serde(serialize_with = "serialize_number")]
    pub amount: f64,
}

/// One point per record, in ledger order, labeled with the record's date.
pub fn trend(records: &[Record]) -> Vec<TrendPoint> {
    records
        .iter()
        .map(|r| TrendPoint {
            label: r.date().to_string(),
            amount: r.amount_value(),
        })
        .collect()
}

/// The growth rate a record contributes to the average.
fn effective_growth(record: &Record) -> f64 {
    let growth = record.growth_value();
    if growth.is_nan() || growth == 0.0 {
        DEFAULT_GROWTH_RATE
    } else {
        growth
    }
}

/// Mean of every record's effective growth rate. `NaN` for an empty ledger.
pub fn average_growth_rate(records: &[Record]) -> f64 {
    let sum: f64 = records.iter().map(effective_growth).sum();
    sum / records.len() as f64
}

/// One point of the projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub year: u32,
    /// `"{year} yr"`
    pub label: String,
    #[serde(serialize_with = "serialize_number")]
    pub value: f64,
}

/// A compounded forecast of net worth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    #[serde(serialize_with = "serialize_number")]
    pub base_total: f64,
    #[serde(serialize_with = "serialize_number")]
    pub average_growth_rate: f64,
    pub points: Vec<ProjectionPoint>,
}

impl Projection {
    /// `base_total * (1 + average_growth_rate / 100)^year` for each year `0..=5`.
    pub fn compute(records: &[Record]) -> Self {
        let base_total = net_worth(records);
        let average_growth_rate = average_growth_rate(records);
        let factor = 1.0 + average_growth_rate / 100.0;
        let points = (0..=PROJECTION_YEARS)
            .map(|year| ProjectionPoint {
                year,
                label: format!("{year} yr"),
                value: base_total * factor.powf(f64::from(year)),
            })
            .collect();
        Self {
            base_total,
            average_growth_rate,
            points,
        }
    }
}

/// Everything derived from the ledger in one place, ready for a renderer.
///
/// Serialized figures are JSON numbers, except `NaN` and the infinities, which are written as
/// the strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    #[serde(serialize_with = "serialize_number")]
    pub net_worth: f64,
    pub categories: Vec<CategoryTotal>,
    pub trend: Vec<TrendPoint>,
    pub projection: Projection,
}

impl Metrics {
    pub fn compute(records: &[Record]) -> Self {
        Self {
            net_worth: net_worth(records),
            categories: category_totals(records),
            trend: trend(records),
            projection: Projection::compute(records),
        }
    }
}
