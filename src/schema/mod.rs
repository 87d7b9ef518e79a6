//! Mapping between storage records and domain types.
//!
//! Each table gets one [`Schema`] implementation; it is the only place that
//! knows the storage field names. Both directions are pure functions.

pub mod department;
pub mod employee;
pub mod log_entry;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::clients::protocol::WireFields;

pub trait Schema: Sized + Send + Sync + 'static {
    /// Storage table name.
    const TABLE: &'static str;

    /// Name used in error messages (`Employee with ID 7 not found`).
    const ENTITY: &'static str;

    /// Fields requested on every read.
    const FIELDS: &'static [&'static str];

    /// Default `orderBy` field for list calls (always descending).
    const DEFAULT_ORDER: &'static str;

    const PAGE_LIMIT: u32;

    type Wire: DeserializeOwned;

    /// Writable fields. Updates always resend the whole draft.
    type Draft: Send + Sync;

    fn to_domain(wire: Self::Wire) -> Self;

    /// Write payload without `Id`; read-only fields are never emitted.
    fn to_wire(draft: &Self::Draft) -> WireFields;

    fn record_id(&self) -> i64;
}

/// A reference field as it comes back from storage.
///
/// Current schema revisions expand references into `{Id, Name}`; older ones
/// return the bare id, and the oldest stored the display label itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Lookup {
    Record {
        #[serde(rename = "Id")]
        id: i64,
        #[serde(rename = "Name", default)]
        name: Option<String>,
    },
    Id(i64),
    Label(String),
}

impl Lookup {
    /// Splits into `(id, label)`.
    #[must_use]
    pub fn into_parts(self) -> (Option<i64>, Option<String>) {
        match self {
            Self::Record { id, name } => (Some(id), name.filter(|n| !n.is_empty())),
            Self::Id(id) => (Some(id), None),
            Self::Label(label) => {
                let trimmed = label.trim();
                if trimmed.is_empty() {
                    (None, None)
                } else if let Ok(id) = trimmed.parse::<i64>() {
                    (Some(id), None)
                } else {
                    (None, Some(trimmed.to_string()))
                }
            }
        }
    }
}

/// Upper bound for salaries and budgets.
pub const MAX_AMOUNT: u64 = 1_000_000_000_000;

#[allow(clippy::cast_precision_loss)]
const MAX_AMOUNT_F64: f64 = MAX_AMOUNT as f64;

/// Whole units of a finite amount in `0..=MAX_AMOUNT`; fractions truncate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn whole_amount(number: f64) -> Option<u64> {
    if !number.is_finite() || number < 0.0 || number > MAX_AMOUNT_F64 {
        return None;
    }
    Some(number.trunc() as u64)
}

/// Accepts numbers, numeric strings or null; negatives clamp to zero,
/// oversized values clamp to [`MAX_AMOUNT`] and fractions truncate.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    Ok(if number > MAX_AMOUNT_F64 {
        MAX_AMOUNT
    } else {
        whole_amount(number).unwrap_or(0)
    })
}

/// `YYYY-MM-DD`, optionally followed by a time part.
pub(crate) fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
                .map(|naive| naive.and_utc())
                .ok()
        })
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn optional_text(value: Option<&String>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.clone()))
}
