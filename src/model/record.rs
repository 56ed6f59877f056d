use crate::model::to_number;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// A single investment transaction.
///
/// Every field is kept as the text that was entered. Nothing is validated on the way in, so an
/// `amount` of `"twelve"` is a perfectly good record; it just coerces to `NaN` when summed.
///
/// Serialized as `{"type": .., "amount": .., "date": .., "growth": ..}`. On the way in `growth`
/// may be missing and `amount`/`growth` may be JSON numbers.
#[derive(Default, Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Free-text category label, e.g. `Stock` or `Mutual Fund`.
    #[serde(rename = "type")]
    kind: String,
    /// The amount as entered.
    #[serde(deserialize_with = "text_or_number")]
    amount: String,
    /// A date label. It is only ever displayed, never parsed.
    date: String,
    /// Expected annual growth in percent, or empty.
    #[serde(default, deserialize_with = "text_or_number")]
    growth: String,
}

impl Record {
    pub fn new(
        kind: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
        growth: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            amount: amount.into(),
            date: date.into(),
            growth: growth.into(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn growth(&self) -> &str {
        &self.growth
    }

    /// The amount coerced to a number, `NaN` if it is not one.
    pub fn amount_value(&self) -> f64 {
        to_number(&self.amount)
    }

    /// The growth rate coerced to a number. Blank growth is `0`.
    pub fn growth_value(&self) -> f64 {
        to_number(&self.growth)
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} on {} (growth: {})",
            self.kind,
            self.amount,
            self.date,
            if self.growth.is_empty() {
                "-"
            } else {
                &self.growth
            }
        )
    }
}

/// Accepts either a JSON string or a JSON number and keeps it as text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let record = Record::new("Stock", "500", "2024-01-01", "8");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"type":"Stock","amount":"500","date":"2024-01-01","growth":"8"}"#
        );
    }

    #[test]
    fn test_missing_growth_defaults_to_empty() {
        let json = r#"{"type":"Gold","amount":"250","date":"2023-05-05"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.growth(), "");
        assert_eq!(record.growth_value(), 0.0);
    }

    #[test]
    fn test_numbers_are_kept_as_text() {
        let json = r#"{"type":"Bond","amount":1200.5,"date":"2022","growth":7}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount(), "1200.5");
        assert_eq!(record.growth(), "7");
        assert_eq!(record.amount_value(), 1200.5);
    }

    #[test]
    fn test_missing_amount_is_an_error() {
        let json = r#"{"type":"Bond","date":"2022","growth":"7"}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn test_wrong_field_type_is_an_error() {
        let json = r#"{"type":"Bond","amount":[1],"date":"2022","growth":"7"}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn test_malformed_amount_is_nan() {
        let record = Record::new("Stock", "lots", "today", "");
        assert!(record.amount_value().is_nan());
    }

    #[test]
    fn test_display() {
        let record = Record::new("Stock", "500", "2024-01-01", "");
        assert_eq!(record.to_string(), "Stock 500 on 2024-01-01 (growth: -)");
    }
}
