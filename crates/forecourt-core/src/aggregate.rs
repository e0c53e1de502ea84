//! # Sales Aggregation
//!
//! Rolls a shift's readings up per attendant for the summary view, and
//! folds the per-attendant rows into grand totals.
//!
//! ## View, Not State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Readings for (shift-type, date)                                        │
//! │        │ group by attendant_id                                          │
//! │        ▼                                                                │
//! │  AttendantSummary per attendant                                         │
//! │    • sum of each payment column                                         │
//! │    • sum of actual proceeds                                             │
//! │    • sum of calculated proceeds (each reading priced via its rate)      │
//! │    • shortage = Σcalculated − Σactual                                   │
//! │        │ fold                                                           │
//! │        ▼                                                                │
//! │  ShiftTotals (simple sums of the per-attendant rows)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The aggregation is recomputed from the stored readings on every read.
//! Nothing here is persisted - editing a reading and refreshing the summary
//! must always agree, and the only way to guarantee that is to never cache.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::reconcile::{compute_proceeds, rate_for};
use crate::types::{ProductRate, Reading};

// =============================================================================
// Summary Rows
// =============================================================================

/// One attendant's totals for a shift. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttendantSummary {
    pub attendant_id: String,

    /// Number of nozzle readings this attendant recorded in the shift.
    pub readings: u32,
    /// Readings with no matching product rate ("rate unavailable").
    pub unrated_readings: u32,

    /// Per-payment-method sums.
    pub cash_sales: Money,
    pub credit_sales: Money,
    pub upi_sales: Money,
    pub card_sales: Money,

    /// Σ actual proceeds over the attendant's readings.
    pub actual_proceeds: Money,
    /// Σ calculated proceeds over the attendant's readings.
    pub calculated_proceeds: Money,
    /// Σcalculated − Σactual. Positive = shortfall.
    pub shortage: Money,
}

impl AttendantSummary {
    fn empty(attendant_id: &str) -> Self {
        AttendantSummary {
            attendant_id: attendant_id.to_string(),
            readings: 0,
            unrated_readings: 0,
            cash_sales: Money::zero(),
            credit_sales: Money::zero(),
            upi_sales: Money::zero(),
            card_sales: Money::zero(),
            actual_proceeds: Money::zero(),
            calculated_proceeds: Money::zero(),
            shortage: Money::zero(),
        }
    }

    fn absorb(&mut self, reading: &Reading, rates: &[ProductRate]) {
        let proceeds = compute_proceeds(reading, rate_for(rates, &reading.product_id));

        self.readings += 1;
        if proceeds.rate_missing {
            self.unrated_readings += 1;
        }

        self.cash_sales += reading.cash_sales();
        self.credit_sales += reading.credit_sales();
        self.upi_sales += reading.upi_sales();
        self.card_sales += reading.card_sales();

        self.actual_proceeds += proceeds.actual;
        self.calculated_proceeds += proceeds.calculated;
        self.shortage = self.calculated_proceeds - self.actual_proceeds;
    }
}

/// Grand totals across all attendants in a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShiftTotals {
    pub cash_sales: Money,
    pub credit_sales: Money,
    pub upi_sales: Money,
    pub card_sales: Money,
    pub actual_proceeds: Money,
    pub calculated_proceeds: Money,
    /// Σcalculated − Σactual across the whole shift.
    pub shortage: Money,
}

/// The complete summary view for one shift instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShiftSummary {
    /// Per-attendant rows in stable (attendant id) order.
    pub attendants: Vec<AttendantSummary>,
    pub totals: ShiftTotals,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Groups a shift's readings by attendant and folds each group's payment
/// columns and proceeds.
///
/// `readings` is the full set for one (shift-type, date); `rates` the rate
/// list in effect for the same shift instance. A missing rate list is an
/// empty list, not an error - every reading simply counts as unrated.
/// Rows come back in stable attendant-id order so repeated renders of the
/// summary page line up.
pub fn aggregate_by_attendant(
    readings: &[Reading],
    rates: &[ProductRate],
) -> Vec<AttendantSummary> {
    let mut groups: BTreeMap<&str, AttendantSummary> = BTreeMap::new();

    for reading in readings {
        groups
            .entry(reading.attendant_id.as_str())
            .or_insert_with(|| AttendantSummary::empty(&reading.attendant_id))
            .absorb(reading, rates);
    }

    groups.into_values().collect()
}

/// Builds the full summary view: per-attendant rows plus grand totals.
///
/// Grand totals are the simple sums of the per-attendant aggregates, so
/// `totals.shortage` equals the sum of every row's shortage exactly.
pub fn summarize_shift(readings: &[Reading], rates: &[ProductRate]) -> ShiftSummary {
    let attendants = aggregate_by_attendant(readings, rates);

    let mut totals = ShiftTotals {
        cash_sales: Money::zero(),
        credit_sales: Money::zero(),
        upi_sales: Money::zero(),
        card_sales: Money::zero(),
        actual_proceeds: Money::zero(),
        calculated_proceeds: Money::zero(),
        shortage: Money::zero(),
    };

    for row in &attendants {
        totals.cash_sales += row.cash_sales;
        totals.credit_sales += row.credit_sales;
        totals.upi_sales += row.upi_sales;
        totals.card_sales += row.card_sales;
        totals.actual_proceeds += row.actual_proceeds;
        totals.calculated_proceeds += row.calculated_proceeds;
    }
    totals.shortage = totals.calculated_proceeds - totals.actual_proceeds;

    ShiftSummary { attendants, totals }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::compute_proceeds;
    use crate::types::ShiftType;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn reading(
        id: &str,
        attendant: &str,
        product: &str,
        sold_liters: i64,
        cash: i64,
        upi: i64,
    ) -> Reading {
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 14, 0, 0).unwrap();
        Reading {
            id: id.into(),
            outlet_id: "o1".into(),
            nozzle_id: format!("nozzle-{id}"),
            attendant_id: attendant.into(),
            product_id: product.into(),
            shift_type: ShiftType::Morning,
            shift_date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            previous_reading_ml: 0,
            current_reading_ml: sold_liters * 1000,
            testing_ml: 0,
            cash_sales_paise: cash,
            credit_sales_paise: 0,
            upi_sales_paise: upi,
            card_sales_paise: 0,
            total_sale_paise: cash + upi,
            created_at: now,
            updated_at: now,
        }
    }

    fn rate(product: &str, paise_per_liter: i64) -> ProductRate {
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 5, 30, 0).unwrap();
        ProductRate {
            id: format!("rate-{product}"),
            outlet_id: "o1".into(),
            product_id: product.into(),
            shift_type: ShiftType::Morning,
            shift_date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            rate_paise: paise_per_liter,
            observed_density_centi: None,
            observed_temperature_deci: None,
            density_at_15c_centi: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_groups_by_attendant_in_stable_order() {
        let readings = vec![
            reading("r1", "zara", "petrol", 100, 1_000_000, 0),
            reading("r2", "amit", "petrol", 50, 500_000, 0),
            reading("r3", "zara", "diesel", 20, 0, 179_000),
        ];
        let rates = vec![rate("petrol", 10_000), rate("diesel", 8_950)];

        let rows = aggregate_by_attendant(&readings, &rates);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].attendant_id, "amit");
        assert_eq!(rows[1].attendant_id, "zara");
        assert_eq!(rows[1].readings, 2);
    }

    #[test]
    fn test_attendant_sums_and_shortage() {
        // zara: 100 L petrol at ₹100/L + 20 L diesel at ₹89.50/L
        //   calculated = ₹10,000 + ₹1,790 = ₹11,790
        //   actual     = ₹10,000 cash + ₹1,700 upi = ₹11,700
        //   shortage   = ₹90
        let readings = vec![
            reading("r1", "zara", "petrol", 100, 1_000_000, 0),
            reading("r2", "zara", "diesel", 20, 0, 170_000),
        ];
        let rates = vec![rate("petrol", 10_000), rate("diesel", 8_950)];

        let rows = aggregate_by_attendant(&readings, &rates);
        assert_eq!(rows.len(), 1);
        let zara = &rows[0];
        assert_eq!(zara.cash_sales, Money::from_paise(1_000_000));
        assert_eq!(zara.upi_sales, Money::from_paise(170_000));
        assert_eq!(zara.calculated_proceeds, Money::from_paise(1_179_000));
        assert_eq!(zara.actual_proceeds, Money::from_paise(1_170_000));
        assert_eq!(zara.shortage, Money::from_paise(9_000));
    }

    #[test]
    fn test_shortage_is_additive_over_readings() {
        let readings = vec![
            reading("r1", "amit", "petrol", 145, 500_000, 900_000),
            reading("r2", "amit", "diesel", 80, 716_000, 0),
        ];
        let rates = vec![rate("petrol", 10_000), rate("diesel", 8_950)];

        let per_reading: Money = readings
            .iter()
            .map(|r| compute_proceeds(r, rate_for(&rates, &r.product_id)).shortage)
            .sum();

        let rows = aggregate_by_attendant(&readings, &rates);
        assert_eq!(rows[0].shortage, per_reading);
    }

    #[test]
    fn test_unrated_readings_counted_not_raised() {
        // Premium has no saved rate: the reading aggregates with zero
        // calculated proceeds and shows up in the unrated count.
        let readings = vec![
            reading("r1", "amit", "petrol", 100, 1_000_000, 0),
            reading("r2", "amit", "premium", 10, 150_000, 0),
        ];
        let rates = vec![rate("petrol", 10_000)];

        let rows = aggregate_by_attendant(&readings, &rates);
        let amit = &rows[0];
        assert_eq!(amit.unrated_readings, 1);
        assert_eq!(amit.calculated_proceeds, Money::from_paise(1_000_000));
        // The premium cash still counts toward actual, pushing an excess
        assert_eq!(amit.actual_proceeds, Money::from_paise(1_150_000));
        assert_eq!(amit.shortage, Money::from_paise(-150_000));
    }

    #[test]
    fn test_missing_rate_list_is_empty_not_error() {
        let readings = vec![reading("r1", "amit", "petrol", 100, 1_000_000, 0)];
        let rows = aggregate_by_attendant(&readings, &[]);
        assert_eq!(rows[0].unrated_readings, 1);
        assert_eq!(rows[0].calculated_proceeds, Money::zero());
    }

    #[test]
    fn test_grand_totals_are_simple_sums() {
        let readings = vec![
            reading("r1", "zara", "petrol", 100, 1_000_000, 0),
            reading("r2", "amit", "petrol", 50, 490_000, 0),
            reading("r3", "amit", "diesel", 20, 0, 179_000),
        ];
        let rates = vec![rate("petrol", 10_000), rate("diesel", 8_950)];

        let summary = summarize_shift(&readings, &rates);
        let row_shortage: Money = summary.attendants.iter().map(|a| a.shortage).sum();
        assert_eq!(summary.totals.shortage, row_shortage);

        assert_eq!(
            summary.totals.calculated_proceeds,
            Money::from_paise(1_000_000 + 500_000 + 179_000)
        );
        assert_eq!(
            summary.totals.actual_proceeds,
            Money::from_paise(1_000_000 + 490_000 + 179_000)
        );
        assert_eq!(summary.totals.shortage, Money::from_paise(10_000));
        assert_eq!(summary.totals.cash_sales, Money::from_paise(1_490_000));
        assert_eq!(summary.totals.upi_sales, Money::from_paise(179_000));
    }

    #[test]
    fn test_empty_shift_summarizes_to_zero() {
        let summary = summarize_shift(&[], &[]);
        assert!(summary.attendants.is_empty());
        assert_eq!(summary.totals.shortage, Money::zero());
        assert_eq!(summary.totals.actual_proceeds, Money::zero());
    }
}
