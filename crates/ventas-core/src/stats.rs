//! # Headline Statistics
//!
//! The four cards above the chart: total sales, total revenue, average
//! ticket and the payment method breakdown.
//!
//! These always cover the FULL history handed in. The range and payment
//! dropdowns narrow the chart and the export, never these cards.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PaymentMethod, Sale};

/// Number of sales per payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentBreakdown {
    pub cash: usize,
    pub card: usize,
    pub nequi: usize,
}

impl PaymentBreakdown {
    fn record(&mut self, method: PaymentMethod) {
        match method {
            PaymentMethod::Cash => self.cash += 1,
            PaymentMethod::Card => self.card += 1,
            PaymentMethod::Nequi => self.nequi += 1,
        }
    }

    /// Count for one method.
    pub fn count(&self, method: PaymentMethod) -> usize {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Card => self.card,
            PaymentMethod::Nequi => self.nequi,
        }
    }
}

/// Summary of the whole sale history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_sales: usize,
    pub total_revenue: Money,
    /// `total_revenue / total_sales`, unrounded; zero without sales.
    pub avg_ticket: Money,
    pub payment_breakdown: PaymentBreakdown,
}

/// Summarizes every sale given, with non-numeric totals counted as zero.
///
/// ## Example
/// ```rust
/// use ventas_core::{summarize, PaymentMethod, Sale};
///
/// let sales = vec![
///     Sale::new("a", "2026-10-16T09:00:00Z", PaymentMethod::Cash, vec![], "50"),
///     Sale::new("b", "2026-10-16T10:00:00Z", PaymentMethod::Nequi, vec![], 50.5),
/// ];
///
/// let stats = summarize(&sales);
/// assert_eq!(stats.total_revenue.to_major(), 100.5);
/// assert_eq!(stats.avg_ticket.to_major(), 50.25);
/// ```
pub fn summarize(all_sales: &[Sale]) -> SalesStats {
    let mut breakdown = PaymentBreakdown::default();
    let mut revenue = Money::zero();

    for sale in all_sales {
        revenue += sale.total_amount();
        breakdown.record(sale.payment_method);
    }

    SalesStats {
        total_sales: all_sales.len(),
        total_revenue: revenue,
        avg_ticket: revenue.average_over(all_sales.len()),
        payment_breakdown: breakdown,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_is_all_zeroes() {
        let stats = summarize(&[]);

        assert_eq!(stats.total_sales, 0);
        assert!(stats.total_revenue.is_zero());
        assert!(stats.avg_ticket.is_zero());
        assert_eq!(stats.payment_breakdown, PaymentBreakdown::default());
    }

    #[test]
    fn test_string_totals_are_coerced() {
        let sales = vec![
            Sale::new("a", "2026-10-16T09:00:00Z", PaymentMethod::Cash, vec![], "50"),
            Sale::new("b", "2026-10-16T10:00:00Z", PaymentMethod::Card, vec![], 50.5),
        ];

        let stats = summarize(&sales);
        assert_eq!(stats.total_sales, 2);
        assert_eq!(stats.total_revenue.to_major(), 100.5);
        assert_eq!(stats.avg_ticket.to_major(), 50.25);
    }

    #[test]
    fn test_breakdown_counts_every_sale_even_with_bad_data() {
        let sales = vec![
            Sale::new("a", "bad date", PaymentMethod::Cash, vec![], "n/a"),
            Sale::new("b", "2026-10-16T10:00:00Z", PaymentMethod::Nequi, vec![], 10.0),
            Sale::new("c", "2020-01-01T10:00:00Z", PaymentMethod::Nequi, vec![], 20.0),
            Sale::new("d", "2026-10-16T11:00:00Z", PaymentMethod::Card, vec![], 30.0),
        ];

        let stats = summarize(&sales);
        assert_eq!(stats.total_sales, 4);
        assert_eq!(stats.total_revenue.to_major(), 60.0);
        assert_eq!(stats.avg_ticket.to_major(), 15.0);
        assert_eq!(stats.payment_breakdown.count(PaymentMethod::Cash), 1);
        assert_eq!(stats.payment_breakdown.count(PaymentMethod::Card), 1);
        assert_eq!(stats.payment_breakdown.count(PaymentMethod::Nequi), 2);
    }

    #[test]
    fn test_average_is_not_rounded() {
        let sales = vec![
            Sale::new("a", "2026-10-16T09:00:00Z", PaymentMethod::Cash, vec![], 100.0),
            Sale::new("b", "2026-10-16T10:00:00Z", PaymentMethod::Cash, vec![], 50.0),
            Sale::new("c", "2026-10-16T11:00:00Z", PaymentMethod::Card, vec![], 50.0),
        ];

        let stats = summarize(&sales);
        assert_eq!(stats.total_revenue.to_major(), 200.0);
        assert_eq!(stats.avg_ticket.to_major(), 200.0 / 3.0);
        assert_eq!(stats.avg_ticket.to_string(), "$66.67");
    }

    #[test]
    fn test_sub_cent_totals_are_preserved() {
        let sales = vec![
            Sale::new("a", "2026-10-16T09:00:00Z", PaymentMethod::Cash, vec![], 0.004),
            Sale::new("b", "2026-10-16T10:00:00Z", PaymentMethod::Cash, vec![], 0.004),
        ];

        assert_eq!(summarize(&sales).total_revenue.to_major(), 0.008);
    }

    #[test]
    fn test_huge_totals_do_not_panic() {
        let sales = vec![
            Sale::new("a", "2026-10-16T09:00:00Z", PaymentMethod::Cash, vec![], 9e16),
            Sale::new("b", "2026-10-16T10:00:00Z", PaymentMethod::Card, vec![], 9e16),
        ];

        let stats = summarize(&sales);
        assert_eq!(stats.total_revenue.to_major(), 1.8e17);
        assert_eq!(stats.avg_ticket.to_major(), 9e16);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(summarize(&[])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalSales": 0,
                "totalRevenue": 0.0,
                "avgTicket": 0.0,
                "paymentBreakdown": {"cash": 0, "card": 0, "nequi": 0}
            })
        );
    }
}
