//! Turns ledger contents and metrics into text for the terminal.
//!
//! Nothing in here touches the store; each function takes what it draws as arguments.

use crate::metrics::{CategoryTotal, Metrics, Projection, TrendPoint};
use crate::model::{display_number, Record};
use serde::Serialize;

/// Shown in place of an empty growth rate or a share that cannot be computed.
const PLACEHOLDER: &str = "-";

/// A display-ready row of the transaction table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub date: String,
    pub growth: String,
}

/// Renders ledger data using a currency symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    currency: String,
}

impl Renderer {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Prefixes `amount` with the currency symbol.
    pub fn money(&self, amount: &str) -> String {
        format!("{}{amount}", self.currency)
    }

    /// Table rows in ledger order. Amounts are shown as entered.
    pub fn rows(&self, records: &[Record]) -> Vec<TableRow> {
        records
            .iter()
            .enumerate()
            .map(|(index, r)| TableRow {
                index,
                kind: r.kind().to_string(),
                amount: self.money(r.amount()),
                date: r.date().to_string(),
                growth: if r.growth().is_empty() {
                    PLACEHOLDER.to_string()
                } else {
                    r.growth().to_string()
                },
            })
            .collect()
    }

    /// The transaction table with a header line.
    pub fn table(&self, records: &[Record]) -> String {
        let header = ["#", "Type", "Amount", "Date", "Growth (%)"];
        let rows: Vec<[String; 5]> = self
            .rows(records)
            .into_iter()
            .map(|r| [r.index.to_string(), r.kind, r.amount, r.date, r.growth])
            .collect();

        let mut widths = header.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &widths, header.iter().copied());
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_row(&mut out, &widths, rule.iter().map(String::as_str));
        for row in &rows {
            push_row(&mut out, &widths, row.iter().map(String::as_str));
        }
        if rows.is_empty() {
            out.push_str("(no transactions)\n");
        }
        out
    }

    /// `Net Worth: <currency><total>`
    pub fn net_worth(&self, total: f64) -> String {
        format!("Net Worth: {}", self.money(&display_number(total)))
    }

    /// One line per category with its total and its share of all category totals.
    pub fn categories(&self, totals: &[CategoryTotal]) -> String {
        let sum: f64 = totals.iter().map(|t| t.total).sum();
        let width = totals
            .iter()
            .map(|t| t.category.chars().count())
            .max()
            .unwrap_or(0);
        totals
            .iter()
            .map(|t| {
                format!(
                    "{:<width$}  {}  ({})\n",
                    t.category,
                    self.money(&display_number(t.total)),
                    share(t.total, sum),
                )
            })
            .collect()
    }

    /// One line per record: date label and amount.
    pub fn trend(&self, points: &[TrendPoint]) -> String {
        let width = points
            .iter()
            .map(|p| p.label.chars().count())
            .max()
            .unwrap_or(0);
        points
            .iter()
            .map(|p| {
                format!(
                    "{:<width$}  {}\n",
                    p.label,
                    self.money(&display_number(p.amount))
                )
            })
            .collect()
    }

    /// One line per projected year.
    pub fn projection(&self, projection: &Projection) -> String {
        let mut out = format!(
            "Average growth: {}%\n",
            display_number(projection.average_growth_rate)
        );
        for p in &projection.points {
            out.push_str(&format!(
                "{:>4}  {}\n",
                p.label,
                self.money(&display_number(p.value))
            ));
        }
        out
    }

    /// The full report: net worth, category breakdown, trend and projection.
    pub fn report(&self, metrics: &Metrics) -> String {
        let mut out = String::new();
        out.push_str(&self.net_worth(metrics.net_worth));
        out.push_str("\n\nBy category\n");
        out.push_str(&self.categories(&metrics.categories));
        out.push_str("\nNet worth over time\n");
        out.push_str(&self.trend(&metrics.trend));
        out.push_str("\nProjected net worth\n");
        out.push_str(&self.projection(&metrics.projection));
        out
    }
}

/// Everything a renderer draws, serializable for `--format json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub rows: Vec<TableRow>,
    pub net_worth: String,
    pub metrics: Metrics,
}

impl View {
    pub fn new(renderer: &Renderer, records: &[Record]) -> Self {
        let metrics = Metrics::compute(records);
        Self {
            rows: renderer.rows(records),
            net_worth: renderer.net_worth(metrics.net_worth),
            metrics,
        }
    }
}

/// A category's share of `sum` as a percentage.
fn share(total: f64, sum: f64) -> String {
    let ratio = total / sum;
    if !ratio.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{}%", format_num::format_num!(",.2", ratio * 100.0))
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
