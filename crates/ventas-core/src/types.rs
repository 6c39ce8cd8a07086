//! # Domain Types
//!
//! Sale records exactly as the sale history delivers them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │    LineItem     │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  name           │   │  CASH           │       │
//! │  │  date (text)    │   │  price (raw)    │   │  CARD           │       │
//! │  │  paymentMethod  │   │  quantity       │   │  NEQUI          │       │
//! │  │  items ─────────┼──►│                 │   └─────────────────┘       │
//! │  │  total (raw)    │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  RawAmount: Number(50.5) | Text("50") | Other(null, true, ...)  │   │
//! │  │  Coerced to Money on read; anything non-numeric counts as 0.    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read-Only Inputs
//! Sales belong to the sale history. Nothing in this workspace mutates them;
//! every analytic borrows a snapshot and produces fresh output.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

/// Naive timestamp layouts accepted for `Sale.date`, read in the caller's zone.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Debit/credit card on the terminal.
    Card,
    /// Nequi mobile wallet transfer.
    Nequi,
}

impl PaymentMethod {
    /// Every method, in the order the stats card shows them.
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Nequi];

    /// Wire form (`CASH`, `CARD`, `NEQUI`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Nequi => "NEQUI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "CARD" => Ok(PaymentMethod::Card),
            "NEQUI" => Ok(PaymentMethod::Nequi),
            _ => Err(CoreError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

// =============================================================================
// Raw Amount
// =============================================================================

/// A monetary field as stored upstream: sometimes a number, sometimes a
/// numeric string, occasionally garbage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawAmount {
    /// Numeric reading of the field. Blank text is 0; unparseable or
    /// non-finite values are 0.
    pub fn as_number(&self) -> f64 {
        let value = match self {
            RawAmount::Number(n) => *n,
            RawAmount::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    0.0
                } else {
                    text.parse::<f64>().unwrap_or(0.0)
                }
            }
            RawAmount::Other(_) => 0.0,
        };

        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Coerced amount.
    pub fn to_money(&self) -> Money {
        Money::from_major(self.as_number())
    }
}

impl Default for RawAmount {
    fn default() -> Self {
        RawAmount::Other(serde_json::Value::Null)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product line within a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product display name at time of sale.
    pub name: String,

    /// Unit price in major units.
    #[serde(default)]
    #[ts(type = "number | string | null")]
    pub price: RawAmount,

    /// Units sold. Fractions are kept (weighed goods); non-numeric values
    /// read as 0.
    #[serde(default, deserialize_with = "lenient_quantity")]
    #[ts(type = "number")]
    pub quantity: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: impl Into<RawAmount>, quantity: impl Into<f64>) -> Self {
        LineItem {
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.price.to_money()
    }

    /// Unit price × quantity.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price().times(self.quantity)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One completed transaction from the sale history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Opaque identifier. Numeric ids are kept as their decimal text.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,

    /// Transaction timestamp as delivered. See [`parse_sale_date`].
    /// Missing or non-text dates load as empty text, an invalid date.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: String,

    pub payment_method: PaymentMethod,

    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Authoritative sale total. Not reconciled with the line items.
    #[serde(default)]
    #[ts(type = "number | string | null")]
    pub total: RawAmount,
}

impl Sale {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        payment_method: PaymentMethod,
        items: Vec<LineItem>,
        total: impl Into<RawAmount>,
    ) -> Self {
        Sale {
            id: id.into(),
            date: date.into(),
            payment_method,
            items,
            total: total.into(),
        }
    }

    /// Coerced sale total.
    #[inline]
    pub fn total_amount(&self) -> Money {
        self.total.to_money()
    }

    /// The sale moment in `tz`, or `None` for an invalid date.
    pub fn parsed_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        parse_sale_date(&self.date, tz)
    }
}

// =============================================================================
// Date Parsing
// =============================================================================

/// Parses a sale timestamp into `tz`.
///
/// ## Accepted Forms
/// ```text
/// 2026-10-16T09:15:00-05:00     RFC 3339, converted into tz
/// 2026-10-16T09:15:00.250Z      RFC 3339 with fraction
/// 2026-10-16T09:15:00           naive, read as wall-clock time in tz
/// 2026-10-16 09:15              naive with space separator
/// 2026-10-16                    date only, read as UTC midnight
/// ```
/// Anything else is an invalid date and yields `None`.
pub fn parse_sale_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(tz));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| tz.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

// =============================================================================
// Lenient Deserializers
// =============================================================================

fn lenient_quantity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawAmount::deserialize(deserializer)?;
    Ok(raw.as_number())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(date) => date,
        _ => String::new(),
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => id,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    fn bogota() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    #[test]
    fn test_payment_method_wire_format() {
        let json = serde_json::to_string(&PaymentMethod::Nequi).unwrap();
        assert_eq!(json, "\"NEQUI\"");

        let parsed: PaymentMethod = serde_json::from_str("\"CARD\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Card);
    }

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!(" Nequi ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Nequi);
        assert!("BITCOIN".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_raw_amount_coercion() {
        assert_eq!(RawAmount::from(50.5).to_money().to_major(), 50.5);
        assert_eq!(RawAmount::from("50").to_money().to_major(), 50.0);
        assert_eq!(RawAmount::from(" 12.25 ").to_money().to_major(), 12.25);
        assert!(RawAmount::from("").to_money().is_zero());
        assert!(RawAmount::from("abc").to_money().is_zero());
        assert!(RawAmount::from("NaN").to_money().is_zero());
        assert!(RawAmount::default().to_money().is_zero());
        assert!(RawAmount::Other(serde_json::json!(true)).to_money().is_zero());
    }

    #[test]
    fn test_sale_deserializes_hybrid_fields() {
        let json = r#"{
            "id": 42,
            "date": "2026-10-16T09:00:00-05:00",
            "paymentMethod": "CASH",
            "items": [{"name": "Tinto", "price": "1500", "quantity": 2.0}],
            "total": "3000"
        }"#;

        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.id, "42");
        assert_eq!(sale.total_amount().to_major(), 3000.0);
        assert_eq!(sale.items[0].quantity, 2.0);
        assert_eq!(sale.items[0].subtotal().to_major(), 3000.0);
    }

    #[test]
    fn test_fractional_quantity_is_kept() {
        let json = r#"{"name": "Queso por kilo", "price": 10000, "quantity": 1.5}"#;

        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 1.5);
        assert_eq!(item.subtotal().to_major(), 15000.0);

        let text: LineItem =
            serde_json::from_str(r#"{"name": "Arroz", "price": "2000", "quantity": "0.25"}"#).unwrap();
        assert_eq!(text.subtotal().to_major(), 500.0);

        let garbage: LineItem =
            serde_json::from_str(r#"{"name": "Pan", "price": 800, "quantity": "dos"}"#).unwrap();
        assert_eq!(garbage.quantity, 0.0);
    }

    #[test]
    fn test_sale_without_usable_date_still_loads() {
        let missing: Sale =
            serde_json::from_str(r#"{"id": "v-1", "paymentMethod": "CASH", "total": 100}"#).unwrap();
        assert_eq!(missing.date, "");
        assert!(missing.parsed_date(&Utc).is_none());

        let null: Sale =
            serde_json::from_str(r#"{"id": "v-2", "date": null, "paymentMethod": "CARD"}"#).unwrap();
        assert!(null.parsed_date(&Utc).is_none());

        let numeric: Sale =
            serde_json::from_str(r#"{"date": 1760600000, "paymentMethod": "NEQUI"}"#).unwrap();
        assert_eq!(numeric.id, "");
        assert!(numeric.parsed_date(&Utc).is_none());
    }

    #[test]
    fn test_sale_tolerates_missing_items_and_total() {
        let json = r#"{"id": "v-9", "date": "garbage", "paymentMethod": "NEQUI", "total": null}"#;

        let sale: Sale = serde_json::from_str(json).unwrap();
        assert!(sale.items.is_empty());
        assert!(sale.total_amount().is_zero());
        assert!(sale.parsed_date(&Utc).is_none());
    }

    #[test]
    fn test_parse_rfc3339_converts_zone() {
        let parsed = parse_sale_date("2026-10-16T14:00:00Z", &bogota()).unwrap();
        assert_eq!(parsed.hour(), 9);
    }

    #[test]
    fn test_parse_naive_uses_caller_zone() {
        let parsed = parse_sale_date("2026-10-16T09:30:00", &bogota()).unwrap();
        assert_eq!(parsed.hour(), 9);
        assert_eq!(parsed.minute(), 30);

        let spaced = parse_sale_date("2026-10-16 21:05", &bogota()).unwrap();
        assert_eq!(spaced.hour(), 21);
    }

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        let parsed = parse_sale_date("2026-10-16", &bogota()).unwrap();
        assert_eq!(parsed.with_timezone(&Utc).hour(), 0);
        assert_eq!(parsed.hour(), 19);
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert!(parse_sale_date("", &Utc).is_none());
        assert!(parse_sale_date("yesterday", &Utc).is_none());
        assert!(parse_sale_date("2026-13-40", &Utc).is_none());
    }
}
