//! # Time Bucket Grouping
//!
//! Turns the filtered sales into the series behind the "Tendencia de ventas"
//! bar chart: one bucket per hour, weekday, day or month.
//!
//! ## Bucket Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DateRange   BucketRule     Key            Order                        │
//! │  ─────────   ──────────     ───            ─────                        │
//! │  TODAY       HourOfDay      "9:00"         first occurrence             │
//! │  WEEK        Weekday        "Mon"          fixed Sun → Sat              │
//! │  MONTH       DayOfMonth     "16"           first occurrence             │
//! │  ALL         MonthOfYear    "10/2026"      first occurrence             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the weekday chart is re-sorted. Hour, day and month buckets keep the
//! order in which their key first appeared in the input, so "10:00" can sit
//! before "9:00" if the history lists it first.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::filter::{filter_sales, DateRange, SalesFilter};
use crate::money::Money;
use crate::types::Sale;

/// Weekday keys, in chart order.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Legend of the revenue dataset.
pub const REVENUE_DATASET_LABEL: &str = "Ingresos por ventas";

/// Legend of the sale count dataset.
pub const COUNT_DATASET_LABEL: &str = "Número de ventas";

const REVENUE_DATASET_COLOR: &str = "rgba(139, 92, 246, 0.7)";
const COUNT_DATASET_COLOR: &str = "rgba(244, 63, 94, 0.7)";

// =============================================================================
// Bucket Rule
// =============================================================================

/// Key extraction rule, one per date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketRule {
    /// `"H:00"`, hour 0-23.
    HourOfDay,
    /// `Sun`..`Sat`.
    Weekday,
    /// `"D"`, day of month without padding.
    DayOfMonth,
    /// `"M/YYYY"`, month without padding.
    MonthOfYear,
}

impl From<DateRange> for BucketRule {
    fn from(range: DateRange) -> Self {
        match range {
            DateRange::Today => BucketRule::HourOfDay,
            DateRange::Week => BucketRule::Weekday,
            DateRange::Month => BucketRule::DayOfMonth,
            DateRange::All => BucketRule::MonthOfYear,
        }
    }
}

impl BucketRule {
    /// Bucket key for a sale at `at` (already in the display zone).
    pub fn key<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String {
        match self {
            BucketRule::HourOfDay => format!("{}:00", at.hour()),
            BucketRule::Weekday => {
                WEEKDAY_LABELS[at.weekday().num_days_from_sunday() as usize].to_string()
            }
            BucketRule::DayOfMonth => at.day().to_string(),
            BucketRule::MonthOfYear => format!("{}/{}", at.month(), at.year()),
        }
    }

    /// Whether buckets are re-sorted into calendar order after grouping.
    pub const fn has_fixed_order(&self) -> bool {
        matches!(self, BucketRule::Weekday)
    }

    fn rank(&self, key: &str) -> usize {
        WEEKDAY_LABELS
            .iter()
            .position(|label| *label == key)
            .unwrap_or(WEEKDAY_LABELS.len())
    }
}

// =============================================================================
// Bucket
// =============================================================================

/// One labeled aggregation point of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bucket {
    pub key: String,
    pub total: Money,
    pub count: usize,
}

impl Bucket {
    fn empty(key: String) -> Self {
        Bucket {
            key,
            total: Money::zero(),
            count: 0,
        }
    }
}

/// Groups sales into buckets keyed by `range`'s rule, dates read in `tz`.
///
/// Sales whose date does not parse have no key and are skipped.
pub fn group_into_buckets<'a, Tz, I>(sales: I, range: DateRange, tz: &Tz) -> Vec<Bucket>
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a Sale>,
{
    let rule = BucketRule::from(range);
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for sale in sales {
        let Some(date) = sale.parsed_date(tz) else {
            continue;
        };
        let key = rule.key(&date);

        let slot = match slots.get(&key) {
            Some(&slot) => slot,
            None => {
                buckets.push(Bucket::empty(key.clone()));
                slots.insert(key, buckets.len() - 1);
                buckets.len() - 1
            }
        };

        let bucket = &mut buckets[slot];
        bucket.total += sale.total_amount();
        bucket.count += 1;
    }

    if rule.has_fixed_order() {
        // Stable sort; keys are unique so ties cannot occur.
        buckets.sort_by_key(|bucket| rule.rank(&bucket.key));
    }

    buckets
}

// =============================================================================
// Chart Series
// =============================================================================

/// Positionally aligned arrays for the bar chart.
///
/// `labels[i]` ↔ `revenue_by_label[i]` ↔ `count_by_label[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub revenue_by_label: Vec<Money>,
    pub count_by_label: Vec<usize>,
}

/// One dataset as the chart library expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
}

impl ChartSeries {
    pub fn from_buckets(buckets: Vec<Bucket>) -> Self {
        let mut series = ChartSeries {
            labels: Vec::with_capacity(buckets.len()),
            revenue_by_label: Vec::with_capacity(buckets.len()),
            count_by_label: Vec::with_capacity(buckets.len()),
        };

        for bucket in buckets {
            series.labels.push(bucket.key);
            series.revenue_by_label.push(bucket.total);
            series.count_by_label.push(bucket.count);
        }

        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Revenue and count datasets with their legends and colors.
    pub fn datasets(&self) -> [ChartDataset; 2] {
        [
            ChartDataset {
                label: REVENUE_DATASET_LABEL.to_string(),
                data: self.revenue_by_label.iter().map(Money::to_major).collect(),
                background_color: REVENUE_DATASET_COLOR.to_string(),
            },
            ChartDataset {
                label: COUNT_DATASET_LABEL.to_string(),
                data: self.count_by_label.iter().map(|count| *count as f64).collect(),
                background_color: COUNT_DATASET_COLOR.to_string(),
            },
        ]
    }
}

/// The chart for the current selection: filter, then group by the range's
/// rule in `now`'s time zone.
pub fn chart_series<Tz: TimeZone>(
    sales: &[Sale],
    filter: &SalesFilter,
    now: &DateTime<Tz>,
) -> ChartSeries {
    let filtered = filter_sales(sales, filter, now);
    ChartSeries::from_buckets(group_into_buckets(filtered, filter.range, &now.timezone()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PaymentFilter;
    use crate::types::{LineItem, PaymentMethod};
    use chrono::{FixedOffset, Utc};

    fn bogota() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn sale(id: &str, date: &str, total: f64) -> Sale {
        Sale::new(id, date, PaymentMethod::Cash, vec![], total)
    }

    #[test]
    fn test_today_single_sale_scenario() {
        let now = bogota().with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap();
        let sales = vec![Sale::new(
            "v-1",
            "2026-10-16T09:00:00-05:00",
            PaymentMethod::Cash,
            vec![LineItem::new("A", 50.0, 2)],
            100.0,
        )];
        let today = SalesFilter::new(DateRange::Today, PaymentFilter::All);

        let series = chart_series(&sales, &today, &now);
        assert_eq!(series.labels, vec!["9:00"]);
        assert_eq!(series.revenue_by_label, vec![Money::from_major(100.0)]);
        assert_eq!(series.count_by_label, vec![1]);
    }

    #[test]
    fn test_week_buckets_follow_calendar_order() {
        // 2026-10-14 is a Wednesday.
        let sales = vec![
            sale("wed", "2026-10-14T10:00:00Z", 10.0),
            sale("mon", "2026-10-12T10:00:00Z", 20.0),
            sale("sat", "2026-10-10T10:00:00Z", 30.0),
            sale("sun", "2026-10-11T10:00:00Z", 40.0),
            sale("mon-again", "2026-10-12T15:00:00Z", 5.0),
        ];

        let buckets = group_into_buckets(&sales, DateRange::Week, &Utc);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["Sun", "Mon", "Wed", "Sat"]);

        let monday = &buckets[1];
        assert_eq!(monday.count, 2);
        assert_eq!(monday.total, Money::from_major(25.0));
    }

    #[test]
    fn test_non_week_buckets_keep_first_occurrence_order() {
        let sales = vec![
            sale("late", "2026-10-16T10:30:00Z", 1.0),
            sale("early", "2026-10-16T09:10:00Z", 1.0),
            sale("late-again", "2026-10-16T10:45:00Z", 1.0),
        ];

        let buckets = group_into_buckets(&sales, DateRange::Today, &Utc);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["10:00", "9:00"]);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_month_and_all_keys() {
        let sales = vec![
            sale("a", "2026-10-05T10:00:00Z", 1.0),
            sale("b", "2026-09-28T10:00:00Z", 1.0),
        ];

        let days: Vec<String> = group_into_buckets(&sales, DateRange::Month, &Utc)
            .into_iter()
            .map(|b| b.key)
            .collect();
        assert_eq!(days, vec!["5", "28"]);

        let months: Vec<String> = group_into_buckets(&sales, DateRange::All, &Utc)
            .into_iter()
            .map(|b| b.key)
            .collect();
        assert_eq!(months, vec!["10/2026", "9/2026"]);
    }

    #[test]
    fn test_keys_use_display_zone() {
        // 03:00 UTC on the 16th is 22:00 on the 15th in Bogotá.
        let sales = vec![sale("night", "2026-10-16T03:00:00Z", 1.0)];

        let buckets = group_into_buckets(&sales, DateRange::Today, &bogota());
        assert_eq!(buckets[0].key, "22:00");
    }

    #[test]
    fn test_non_numeric_totals_count_but_add_nothing() {
        let sales = vec![
            Sale::new("a", "2026-10-16T10:00:00Z", PaymentMethod::Card, vec![], "abc"),
            Sale::new("b", "2026-10-16T10:20:00Z", PaymentMethod::Card, vec![], "50"),
        ];

        let buckets = group_into_buckets(&sales, DateRange::Today, &Utc);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].total, Money::from_major(50.0));
    }

    #[test]
    fn test_bucket_counts_sum_to_filtered_length() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap();
        let sales = vec![
            sale("a", "2026-10-16T08:00:00Z", 1.0),
            sale("b", "2026-10-14T08:00:00Z", 2.0),
            sale("c", "2026-10-01T08:00:00Z", 3.0),
            sale("d", "2025-12-24T08:00:00Z", 4.0),
            sale("e", "not a date", 5.0),
        ];

        for range in [DateRange::Today, DateRange::Week, DateRange::Month, DateRange::All] {
            let filter = SalesFilter::new(range, PaymentFilter::All);
            let series = chart_series(&sales, &filter, &now);
            let counted: usize = series.count_by_label.iter().sum();
            assert_eq!(counted, filter_sales(&sales, &filter, &now).len(), "{range}");
        }
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        let series = ChartSeries::from_buckets(group_into_buckets(Vec::<&Sale>::new(), DateRange::Week, &Utc));
        assert!(series.is_empty());
        assert!(series.revenue_by_label.is_empty());
        assert!(series.count_by_label.is_empty());
    }

    #[test]
    fn test_datasets_carry_legends() {
        let series = ChartSeries {
            labels: vec!["Mon".to_string()],
            revenue_by_label: vec![Money::from_major(100.5)],
            count_by_label: vec![2],
        };

        let [revenue, count] = series.datasets();
        assert_eq!(revenue.label, "Ingresos por ventas");
        assert_eq!(revenue.data, vec![100.5]);
        assert_eq!(count.label, "Número de ventas");
        assert_eq!(count.data, vec![2.0]);
    }
}
