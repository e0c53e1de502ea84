//! # Reading Reconciliation
//!
//! Turns one nozzle's raw shift entry - opening/closing meter values,
//! testing volume, and the reported payment split - into litres sold,
//! expected revenue, and the shortage or excess against what the attendant
//! actually handed in.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reconciling One Reading                              │
//! │                                                                         │
//! │  Reading {previous, current, testing}     ProductRate {rate/L}          │
//! │        │                                        │                       │
//! │        ▼                                        │                       │
//! │  liters_sold = current − previous − testing     │                       │
//! │        │                                        │                       │
//! │        └────────────────┬───────────────────────┘                       │
//! │                         ▼                                               │
//! │  calculated = liters_sold × rate      actual = cash+credit+upi+card     │
//! │                         │                       │                       │
//! │                         └───────────┬───────────┘                       │
//! │                                     ▼                                   │
//! │                      shortage = calculated − actual                     │
//! │                                                                         │
//! │  Positive shortage = shortfall (less cash collected than the meter     │
//! │  implies). The "Shortage"/"Excess" labels a page shows are a display   │
//! │  concern; the numeric convention never flips inside the engine.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Permissiveness
//! These functions never error on numeric edge cases. Negative litres sold
//! (closing below opening, or testing above the delta) flows through as-is:
//! the business process relies on a dealer *seeing* a meter-entry mistake,
//! so clamping it to zero would hide exactly the anomaly worth reviewing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::measure::Volume;
use crate::money::Money;
use crate::types::{ProductRate, Reading};

// =============================================================================
// Per-Reading Arithmetic
// =============================================================================

/// Litres sold through a nozzle this shift: closing − opening − testing.
///
/// Linear in all three inputs and deliberately unclamped - may be negative
/// when the entry is inconsistent.
///
/// ## Example
/// ```rust
/// use forecourt_core::measure::Volume;
/// use forecourt_core::reconcile::liters_sold_from;
///
/// let sold = liters_sold_from(
///     Volume::from_liters(1000), // opening
///     Volume::from_liters(1150), // closing
///     Volume::from_liters(5),    // testing
/// );
/// assert_eq!(sold, Volume::from_liters(145));
/// ```
#[inline]
pub fn liters_sold_from(previous: Volume, current: Volume, testing: Volume) -> Volume {
    current - previous - testing
}

/// Litres sold for a recorded reading.
#[inline]
pub fn liters_sold(reading: &Reading) -> Volume {
    liters_sold_from(
        reading.previous_reading(),
        reading.current_reading(),
        reading.testing(),
    )
}

/// Actual proceeds: the sum of the four reported payment columns.
///
/// This is also the value stored redundantly as `total_sale_paise`; the
/// engine recomputes it here so a stale stored copy can never skew a
/// summary.
#[inline]
pub fn actual_proceeds(reading: &Reading) -> Money {
    reading.cash_sales() + reading.credit_sales() + reading.upi_sales() + reading.card_sales()
}

// =============================================================================
// Proceeds
// =============================================================================

/// The reconciled money view of one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Proceeds {
    /// Expected revenue: litres sold × rate (zero when no rate matched).
    pub calculated: Money,
    /// Reported revenue: sum of the payment columns.
    pub actual: Money,
    /// calculated − actual. Positive = shortfall, negative = excess.
    pub shortage: Money,
    /// True when no product rate matched the reading - the reading still
    /// reconciles (calculated = 0) and the condition is surfaced to the
    /// user as "rate unavailable" rather than raised as an error.
    pub rate_missing: bool,
}

/// Reconciles one reading against the rate in effect for its product.
///
/// `rate` is the matching [`ProductRate`] for the reading's product and
/// shift, or `None` when the manager has not saved one; the missing-rate
/// condition produces zero calculated proceeds instead of failing, so the
/// whole of the reported revenue shows up as excess until the rate is
/// entered.
///
/// ## Example
/// ```rust
/// use forecourt_core::money::Money;
/// # use forecourt_core::types::{Reading, ShiftType};
/// # use chrono::{NaiveDate, Utc};
/// # let now = Utc::now();
/// # let reading = Reading {
/// #     id: "r1".into(), outlet_id: "o1".into(), nozzle_id: "n1".into(),
/// #     attendant_id: "a1".into(), product_id: "petrol".into(),
/// #     shift_type: ShiftType::Morning,
/// #     shift_date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
/// #     previous_reading_ml: 1_000_000, current_reading_ml: 1_150_000,
/// #     testing_ml: 5_000,
/// #     cash_sales_paise: 500_000, credit_sales_paise: 0,
/// #     upi_sales_paise: 900_000, card_sales_paise: 0,
/// #     total_sale_paise: 1_400_000, created_at: now, updated_at: now,
/// # };
/// use forecourt_core::reconcile::compute_proceeds;
///
/// let proceeds = compute_proceeds(&reading, None);
/// assert!(proceeds.rate_missing);
/// assert_eq!(proceeds.calculated, Money::zero());
/// assert_eq!(proceeds.shortage, -proceeds.actual);
/// ```
pub fn compute_proceeds(reading: &Reading, rate: Option<&ProductRate>) -> Proceeds {
    let actual = actual_proceeds(reading);
    let calculated = match rate {
        Some(rate) => liters_sold(reading).cost_at(rate.rate()),
        None => Money::zero(),
    };

    Proceeds {
        calculated,
        actual,
        shortage: calculated - actual,
        rate_missing: rate.is_none(),
    }
}

/// Finds the rate in effect for a product within a shift's rate list.
///
/// The caller passes the rates already scoped to the shift instance
/// (`list_product_rates(date, shift_type)`), so matching is by product only.
pub fn rate_for<'a>(rates: &'a [ProductRate], product_id: &str) -> Option<&'a ProductRate> {
    rates.iter().find(|rate| rate.product_id == product_id)
}

// =============================================================================
// Opening Reading Auto-Population
// =============================================================================

/// How the opening-reading field of a shift entry form gets its value.
///
/// When a nozzle is selected the most recent prior reading for that nozzle
/// (by creation order, regardless of shift/date) supplies the opening value,
/// shown read-only. A nozzle with no history leaves the field open for
/// manual entry, flagged so the user knows the starting value is unverified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum OpeningReading {
    /// Carried forward from the prior reading's closing value; read-only.
    CarriedForward {
        value: Volume,
    },
    /// No prior reading exists; manual entry, unverified starting value.
    Manual,
}

impl OpeningReading {
    /// Derives the opening-reading prefill from the nozzle's last reading.
    pub fn from_last_reading(last: Option<&Reading>) -> Self {
        match last {
            Some(reading) => OpeningReading::CarriedForward {
                value: reading.current_reading(),
            },
            None => OpeningReading::Manual,
        }
    }

    /// The prefilled value, if one was carried forward.
    pub fn value(&self) -> Option<Volume> {
        match self {
            OpeningReading::CarriedForward { value } => Some(*value),
            OpeningReading::Manual => None,
        }
    }

    /// Whether the starting value came from recorded history.
    pub fn is_verified(&self) -> bool {
        matches!(self, OpeningReading::CarriedForward { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShiftType;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn reading(previous_ml: i64, current_ml: i64, testing_ml: i64) -> Reading {
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 14, 0, 0).unwrap();
        Reading {
            id: "r1".into(),
            outlet_id: "o1".into(),
            nozzle_id: "n1".into(),
            attendant_id: "a1".into(),
            product_id: "petrol".into(),
            shift_type: ShiftType::Morning,
            shift_date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            previous_reading_ml: previous_ml,
            current_reading_ml: current_ml,
            testing_ml,
            cash_sales_paise: 0,
            credit_sales_paise: 0,
            upi_sales_paise: 0,
            card_sales_paise: 0,
            total_sale_paise: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn rate_of(paise_per_liter: i64) -> ProductRate {
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 5, 30, 0).unwrap();
        ProductRate {
            id: "pr1".into(),
            outlet_id: "o1".into(),
            product_id: "petrol".into(),
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
    fn test_liters_sold_scenario() {
        // previous 1000, current 1150, testing 5 → 145 L
        let reading = reading(1_000_000, 1_150_000, 5_000);
        assert_eq!(liters_sold(&reading), Volume::from_liters(145));
    }

    #[test]
    fn test_liters_sold_is_linear() {
        for (p, c, t) in [
            (0i64, 0i64, 0i64),
            (1_000_000, 1_150_000, 5_000),
            (500, 250, 0),
            (10, 20, 40),
        ] {
            let r = reading(p, c, t);
            assert_eq!(liters_sold(&r).milliliters(), c - p - t);
        }
    }

    #[test]
    fn test_liters_sold_negative_preserved() {
        // Closing below opening: negative litres, not clamped
        let backwards = reading(1_150_000, 1_000_000, 0);
        assert_eq!(liters_sold(&backwards), Volume::from_liters(-150));

        // Testing above the delta: also negative
        let over_tested = reading(1_000_000, 1_000_500, 2_000);
        assert_eq!(liters_sold(&over_tested).milliliters(), -1_500);
    }

    #[test]
    fn test_calculated_proceeds_scenario() {
        // 145 L at ₹100/L = ₹14,500.00
        let reading = reading(1_000_000, 1_150_000, 5_000);
        let rate = rate_of(10_000);
        let proceeds = compute_proceeds(&reading, Some(&rate));
        assert_eq!(proceeds.calculated, Money::from_paise(1_450_000));
        assert!(!proceeds.rate_missing);
    }

    #[test]
    fn test_shortage_scenario() {
        // Payments {cash 5000, credit 0, upi 9000, card 0} against 145 L at
        // ₹100/L → actual ₹14,000.00, shortage ₹500.00 (shortfall)
        let mut r = reading(1_000_000, 1_150_000, 5_000);
        r.cash_sales_paise = 500_000;
        r.upi_sales_paise = 900_000;

        let rate = rate_of(10_000);
        let proceeds = compute_proceeds(&r, Some(&rate));
        assert_eq!(proceeds.actual, Money::from_paise(1_400_000));
        assert_eq!(proceeds.shortage, Money::from_paise(50_000));
        assert!(proceeds.shortage.is_positive()); // shortfall
    }

    #[test]
    fn test_actual_proceeds_sums_all_four_columns() {
        let mut r = reading(0, 0, 0);
        r.cash_sales_paise = 111;
        r.credit_sales_paise = 222;
        r.upi_sales_paise = 333;
        r.card_sales_paise = 444;
        assert_eq!(actual_proceeds(&r).paise(), 1110);
    }

    #[test]
    fn test_missing_rate_surfaces_as_excess() {
        // No rate: calculated 0, shortage = −actual, flagged
        let mut r = reading(1_000_000, 1_150_000, 5_000);
        r.cash_sales_paise = 1_400_000;

        let proceeds = compute_proceeds(&r, None);
        assert!(proceeds.rate_missing);
        assert_eq!(proceeds.calculated, Money::zero());
        assert_eq!(proceeds.shortage, Money::from_paise(-1_400_000));
    }

    #[test]
    fn test_shortage_identity() {
        let mut r = reading(200_000, 350_000, 0);
        r.cash_sales_paise = 900_000;
        r.card_sales_paise = 450_000;

        let rate = rate_of(9_431);
        let proceeds = compute_proceeds(&r, Some(&rate));
        assert_eq!(proceeds.shortage, proceeds.calculated - proceeds.actual);
    }

    #[test]
    fn test_rate_for_matches_by_product() {
        let petrol = rate_of(10_000);
        let diesel = ProductRate {
            id: "pr2".into(),
            product_id: "diesel".into(),
            rate_paise: 8_950,
            ..rate_of(0)
        };
        let rates = vec![petrol, diesel];

        assert_eq!(rate_for(&rates, "diesel").unwrap().rate_paise, 8_950);
        assert_eq!(rate_for(&rates, "petrol").unwrap().rate_paise, 10_000);
        assert!(rate_for(&rates, "premium").is_none());
    }

    #[test]
    fn test_opening_reading_carried_forward() {
        let last = reading(1_000_000, 1_150_000, 5_000);
        let opening = OpeningReading::from_last_reading(Some(&last));
        assert!(opening.is_verified());
        assert_eq!(opening.value(), Some(Volume::from_liters(1150)));
    }

    #[test]
    fn test_opening_reading_manual_when_no_history() {
        let opening = OpeningReading::from_last_reading(None);
        assert!(!opening.is_verified());
        assert_eq!(opening.value(), None);
    }
}
