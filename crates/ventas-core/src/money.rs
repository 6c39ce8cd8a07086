//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why a Money Type?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AMOUNTS AS DELIVERED                                                   │
//! │                                                                         │
//! │  The sale history carries plain numbers in major units (pesos):         │
//! │    "50" → 50.0, 50.5 → 50.5, null → 0.0                                 │
//! │                                                                         │
//! │  Totals, averages and subtotals keep full precision:                    │
//! │    200 / 3 = 66.666…  (the stats card shows $66.67)                     │
//! │                                                                         │
//! │  Rounding happens only in Display. Arithmetic never panics: NaN reads  │
//! │  as zero and overflow saturates at ±f64::MAX.                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ventas_core::money::Money;
//!
//! let price = Money::from_major(2500.5);
//! assert_eq!(price.to_string(), "$2500.50");
//!
//! let subtotal = price.times(1.5);
//! assert_eq!(subtotal.to_major(), 3750.75);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in major currency units, always finite.
///
/// ## Where Money is Used
/// ```text
/// Sale.total ──┬──► Bucket.total ──► ChartSeries.revenue_by_label
///              ├──► SalesStats.total_revenue / avg_ticket
///              └──► ExportRow.sale_total
///
/// LineItem.price ──► ExportRow.unit_price ──► ExportRow.subtotal
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value from a major-unit number.
    ///
    /// NaN becomes zero; infinities saturate at ±`f64::MAX`.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(10.994).to_major(), 10.994);
    /// assert_eq!(Money::from_major(f64::NAN), Money::zero());
    /// assert_eq!(Money::from_major(f64::INFINITY).to_major(), f64::MAX);
    /// ```
    pub fn from_major(amount: f64) -> Self {
        if amount.is_nan() {
            Money(0.0)
        } else {
            Money(amount.clamp(f64::MIN, f64::MAX))
        }
    }

    /// Returns the value in major units.
    #[inline]
    pub const fn to_major(&self) -> f64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Unit price times a (possibly fractional) quantity.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// let unit_price = Money::from_major(10000.0);
    /// assert_eq!(unit_price.times(1.5).to_major(), 15000.0);
    /// ```
    #[inline]
    pub fn times(&self, quantity: f64) -> Self {
        Money::from_major(self.0 * quantity)
    }

    /// Divides evenly across `count` parts without rounding.
    ///
    /// Returns zero when `count` is zero instead of dividing by zero.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(200.0).average_over(3).to_major(), 200.0 / 3.0);
    /// assert_eq!(Money::from_major(1000.0).average_over(0), Money::zero());
    /// ```
    pub fn average_over(&self, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        Money::from_major(self.0 / count as f64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display mirrors the stats cards: `$1234.50`, rounded to the cent.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0.0 { "-" } else { "" };
        write!(f, "{}${:.2}", sign, self.0.abs())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money::from_major(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
