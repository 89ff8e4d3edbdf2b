//! Row models of the hospital list endpoints
//!
//! Each entity knows its columns and filters; the list controller and the
//! table renderer only ever see rows through these definitions.

pub mod appointments;
pub mod billing;
pub mod doctors;
pub mod inventory;
pub mod patients;
pub mod records;

pub use appointments::Appointment;
pub use billing::Invoice;
pub use doctors::Doctor;
pub use inventory::InventoryItem;
pub use patients::Patient;
pub use records::MedicalRecord;

use chrono::{DateTime, NaiveDate};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    list::{filters::FilterDefinition, table::Column},
    models::EntityKind,
};

/// A row type served by one list endpoint
pub trait ListEntity: DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Identity used as the list key and for delete requests
    fn id(&self) -> String;

    /// Human-readable name used in confirmations
    fn display_name(&self) -> String;

    fn columns() -> Vec<Column<Self>>;

    fn filters() -> Vec<FilterDefinition>;

    fn empty_message() -> &'static str {
        "No data available"
    }

    /// Whether activating a row opens its details
    fn has_details() -> bool {
        true
    }
}

/// Accept ids sent either as JSON strings or numbers
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Treat JSON `null` like a missing field
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a plain date or a full RFC 3339 timestamp; anything else is no date
pub(crate) fn flexible_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())))
}

/// Accept amounts sent as JSON numbers or decimal strings
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.as_f64().unwrap_or_default()),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {:?}", s))),
        Value::Null => Ok(0.0),
        other => Err(serde::de::Error::custom(format!(
            "expected a number, got {}",
            other
        ))),
    }
}

/// Join non-empty name parts with a space
pub(crate) fn full_name(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct IdOnly {
        #[serde(deserialize_with = "id_string")]
        id: String,
    }

    #[test]
    fn test_id_accepts_strings_and_numbers() {
        let row: IdOnly = serde_json::from_str(r#"{"id": "p-17"}"#).unwrap();
        assert_eq!(row.id, "p-17");
        let row: IdOnly = serde_json::from_str(r#"{"id": 17}"#).unwrap();
        assert_eq!(row.id, "17");
        assert!(serde_json::from_str::<IdOnly>(r#"{"id": [1]}"#).is_err());
    }

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Loose {
        #[serde(deserialize_with = "null_default")]
        status: String,
        #[serde(deserialize_with = "flexible_date")]
        date: Option<NaiveDate>,
        #[serde(deserialize_with = "lenient_number")]
        amount: f64,
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let loose: Loose = serde_json::from_str(r#"{"status": null, "date": null, "amount": null}"#).unwrap();
        assert_eq!(loose.status, "");
        assert!(loose.date.is_none());
        assert_eq!(loose.amount, 0.0);

        let missing: Loose = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.status, "");
    }

    #[test]
    fn test_dates_accept_timestamps() {
        let expected = NaiveDate::from_ymd_opt(1990, 12, 10);
        for raw in ["1990-12-10", "1990-12-10T00:00:00.000Z", "1990-12-10T08:30:00+09:00"] {
            let loose: Loose = serde_json::from_value(serde_json::json!({ "date": raw })).unwrap();
            assert_eq!(loose.date, expected, "{}", raw);
        }
        let loose: Loose = serde_json::from_str(r#"{"date": "next tuesday"}"#).unwrap();
        assert!(loose.date.is_none());
    }

    #[test]
    fn test_amounts_accept_decimal_strings() {
        let loose: Loose = serde_json::from_str(r#"{"amount": "150.50"}"#).unwrap();
        assert_eq!(loose.amount, 150.5);
        let loose: Loose = serde_json::from_str(r#"{"amount": 99}"#).unwrap();
        assert_eq!(loose.amount, 99.0);
        assert!(serde_json::from_str::<Loose>(r#"{"amount": "lots"}"#).is_err());
    }

    #[test]
    fn test_full_name_skips_blanks() {
        assert_eq!(full_name(&["Jane", "", " Doe "]), "Jane Doe");
        assert_eq!(full_name(&["", ""]), "");
    }
}
