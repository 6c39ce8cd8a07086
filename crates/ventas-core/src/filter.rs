//! # Date Range Filter
//!
//! Narrows the sale history to the window and payment method selected on
//! the sales history screen.
//!
//! ## Range Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  now = Fri 2026-10-16 18:00 (local)                                     │
//! │                                                                         │
//! │  TODAY ── 2026-10-16 00:00:00.000      start of the calendar day        │
//! │  WEEK  ── 2026-10-09 18:00             7 calendar days back, not        │
//! │                                        aligned to a week start          │
//! │  MONTH ── 2026-09-16 18:00             1 calendar month back            │
//! │  ALL   ── 1970-01-01 00:00 UTC         the epoch                        │
//! │                                                                         │
//! │  A sale passes when date >= boundary AND the payment filter matches.    │
//! │  A sale whose date does not parse never passes.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The selection is plain data held by the caller and passed on every call;
//! nothing here remembers the last selection.

use chrono::{DateTime, Days, Duration, Months, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::{PaymentMethod, Sale};

// =============================================================================
// Date Range
// =============================================================================

/// Time window selected in the range dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Today,
    Week,
    Month,
    /// Whole history. Unknown range names also land here.
    #[serde(other)]
    All,
}

impl DateRange {
    /// Total parse: `today`, `week`, `month`; anything else is `All`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "today" => DateRange::Today,
            "week" => DateRange::Week,
            "month" => DateRange::Month,
            _ => DateRange::All,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::All => "all",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DateRange::parse(s))
    }
}

// =============================================================================
// Payment Filter
// =============================================================================

/// Payment method dropdown: every method, or exactly one.
///
/// Wire form is the dropdown value: `ALL`, `CASH`, `CARD` or `NEQUI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentFilter {
    #[default]
    All,
    Method(PaymentMethod),
}

impl PaymentFilter {
    /// True when a sale paid with `method` should be shown.
    #[inline]
    pub fn matches(&self, method: PaymentMethod) -> bool {
        match self {
            PaymentFilter::All => true,
            PaymentFilter::Method(selected) => *selected == method,
        }
    }
}

impl fmt::Display for PaymentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentFilter::All => f.write_str("ALL"),
            PaymentFilter::Method(method) => fmt::Display::fmt(method, f),
        }
    }
}

impl FromStr for PaymentFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PaymentFilter::All);
        }
        s.parse().map(PaymentFilter::Method)
    }
}

impl TryFrom<String> for PaymentFilter {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentFilter> for String {
    fn from(filter: PaymentFilter) -> Self {
        filter.to_string()
    }
}

impl From<PaymentMethod> for PaymentFilter {
    fn from(method: PaymentMethod) -> Self {
        PaymentFilter::Method(method)
    }
}

// =============================================================================
// Sales Filter (the caller-held selection)
// =============================================================================

/// The `{range, paymentFilter}` pair the screen holds and passes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesFilter {
    pub range: DateRange,
    pub payment_filter: PaymentFilter,
}

impl SalesFilter {
    pub fn new(range: DateRange, payment_filter: PaymentFilter) -> Self {
        SalesFilter {
            range,
            payment_filter,
        }
    }
}

impl Default for SalesFilter {
    /// The screen opens on the last week, every payment method.
    fn default() -> Self {
        SalesFilter::new(DateRange::Week, PaymentFilter::All)
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Earliest moment a sale may have to fall inside `range`, evaluated
/// against `now` in `now`'s time zone.
pub fn start_boundary<Tz: TimeZone>(range: DateRange, now: &DateTime<Tz>) -> DateTime<Tz> {
    match range {
        DateRange::Today => start_of_day(now),
        DateRange::Week => now
            .clone()
            .checked_sub_days(Days::new(7))
            .unwrap_or_else(|| now.clone() - Duration::days(7)),
        DateRange::Month => now
            .clone()
            .checked_sub_months(Months::new(1))
            .unwrap_or_else(|| now.clone() - Duration::days(30)),
        // DateTime<Utc>::default() is the Unix epoch.
        DateRange::All => DateTime::<Utc>::default().with_timezone(&now.timezone()),
    }
}

/// Returns the sales inside the selected window and payment method, in
/// input order.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use ventas_core::{filter_sales, DateRange, PaymentFilter, PaymentMethod, Sale, SalesFilter};
///
/// let sales = vec![
///     Sale::new("a", "2026-10-16T08:00:00Z", PaymentMethod::Cash, vec![], 10.0),
///     Sale::new("b", "2026-10-16T09:00:00Z", PaymentMethod::Card, vec![], 20.0),
///     Sale::new("c", "not a date", PaymentMethod::Cash, vec![], 30.0),
/// ];
/// let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
/// let cash_today = SalesFilter::new(DateRange::Today, PaymentMethod::Cash.into());
///
/// let ids: Vec<&str> = filter_sales(&sales, &cash_today, &now)
///     .into_iter()
///     .map(|s| s.id.as_str())
///     .collect();
/// assert_eq!(ids, vec!["a"]);
/// ```
pub fn filter_sales<'a, Tz: TimeZone>(
    sales: &'a [Sale],
    filter: &SalesFilter,
    now: &DateTime<Tz>,
) -> Vec<&'a Sale> {
    let boundary = start_boundary(filter.range, now);
    let tz = now.timezone();

    sales
        .iter()
        .filter(|sale| filter.payment_filter.matches(sale.payment_method))
        .filter(|sale| {
            sale.parsed_date(&tz)
                .is_some_and(|date| date >= boundary)
        })
        .collect()
}

fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

// =============================================================================
// Unit Tests
// =============================================================================
