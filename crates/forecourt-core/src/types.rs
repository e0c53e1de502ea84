//! # Domain Types
//!
//! Core domain types used throughout Forecourt.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Nozzle      │   │     Reading     │   │   ProductRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  tank_id        │   │  nozzle_id      │   │  product_id     │       │
//! │  │  product_id     │   │  attendant_id   │   │  shift key      │       │
//! │  │  nozzle_number  │   │  shift key      │   │  rate_paise     │       │
//! │  └─────────────────┘   │  meter columns  │   │  density obs.   │       │
//! │                        │  payment columns│   └─────────────────┘       │
//! │  ┌─────────────────┐   └─────────────────┘   ┌─────────────────┐       │
//! │  │   StockEntry    │                         │   ShiftType     │       │
//! │  │  ─────────────  │   ┌─────────────────┐   │  ─────────────  │       │
//! │  │  tank_id        │   │ Tank, Attendant │   │  Morning        │       │
//! │  │  shift key      │   │ (configuration) │   │  Evening        │       │
//! │  │  stock columns  │   └─────────────────┘   │  Night          │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Column Convention
//! Persisted entities carry raw `i64` columns with unit suffixes (`*_ml`,
//! `*_paise`, `*_centi`, `*_deci`) exactly as stored, plus accessor methods
//! returning the fixed-point types from [`money`](crate::money) and
//! [`measure`](crate::measure). The database, the engine, and the API all
//! speak the same integers; only the UI formats decimals.
//!
//! ## Natural Keys
//! Shift-scoped entities are identified by natural composite keys:
//! at most one `Reading` per (nozzle, shift-type, date), one `ProductRate`
//! per (product, shift-type, date), one `StockEntry` per (tank, shift-type,
//! date). Storage enforces these as UNIQUE indexes; the aggregation in
//! [`aggregate`](crate::aggregate) relies on them to never double-count.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::measure::{Density, Temperature, Volume};
use crate::money::Money;

// =============================================================================
// Shift Type
// =============================================================================

/// One of the three fixed daily shift periods.
///
/// Ordering is fixed: morning → evening → night. Each date's three shifts
/// are independent; there is no ordering across dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Morning,
    Evening,
    Night,
}

impl ShiftType {
    /// The three shift types in daily order.
    pub const SEQUENCE: [ShiftType; 3] = [ShiftType::Morning, ShiftType::Evening, ShiftType::Night];

    /// Returns the next shift-type in the fixed daily sequence.
    ///
    /// Night has no successor: the sequence does not wrap to the next
    /// date's morning, which is what keeps the night shift conditionally
    /// editable in the lock policy.
    ///
    /// ## Example
    /// ```rust
    /// use forecourt_core::types::ShiftType;
    ///
    /// assert_eq!(ShiftType::Morning.successor(), Some(ShiftType::Evening));
    /// assert_eq!(ShiftType::Evening.successor(), Some(ShiftType::Night));
    /// assert_eq!(ShiftType::Night.successor(), None);
    /// ```
    pub const fn successor(&self) -> Option<ShiftType> {
        match self {
            ShiftType::Morning => Some(ShiftType::Evening),
            ShiftType::Evening => Some(ShiftType::Night),
            ShiftType::Night => None,
        }
    }

    /// Returns the lowercase storage name ("morning", "evening", "night").
    pub const fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Morning => "morning",
            ShiftType::Evening => "evening",
            ShiftType::Night => "night",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Shift Key
// =============================================================================

/// Identifies one shift instance: a shift-type on a calendar date.
///
/// The source application this replaces held the selected shift in ambient
/// UI state shared across views. Here the pair is an explicit parameter
/// threaded into every engine call, so the reconciliation functions stay
/// pure and testable in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShiftKey {
    pub shift_type: ShiftType,
    #[ts(as = "String")]
    pub date: NaiveDate,
}

impl ShiftKey {
    /// Creates a shift key.
    #[inline]
    pub const fn new(shift_type: ShiftType, date: NaiveDate) -> Self {
        ShiftKey { shift_type, date }
    }

    /// The shift instance that follows this one on the same date, if any.
    #[inline]
    pub fn successor(&self) -> Option<ShiftKey> {
        self.shift_type
            .successor()
            .map(|next| ShiftKey::new(next, self.date))
    }
}

impl fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.shift_type, self.date)
    }
}

// =============================================================================
// Nozzle
// =============================================================================

/// A single fuel-dispensing outlet on a dispensing unit.
///
/// Invariant: a nozzle maps to exactly one product and one tank at a given
/// time. Readings snapshot the product at record time, so re-plumbing a
/// nozzle never rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Nozzle {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Outlet this nozzle belongs to.
    pub outlet_id: String,

    /// Dispensing unit the nozzle is mounted on.
    pub dispensing_unit_id: String,

    /// Tank the nozzle draws from.
    pub tank_id: String,

    /// Product (fuel type) the nozzle sells.
    pub product_id: String,

    /// Position of the nozzle on its dispensing unit (1-based).
    pub nozzle_number: i64,

    /// Calibration certificate expiry, if recorded.
    #[ts(as = "Option<String>")]
    pub calibration_valid_until: Option<NaiveDate>,

    /// Whether the nozzle is in service (soft delete).
    pub is_active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Nozzle {
    /// Whether the calibration certificate covers the given date.
    ///
    /// A nozzle with no recorded expiry is treated as uncertified.
    pub fn calibration_valid_on(&self, date: NaiveDate) -> bool {
        match self.calibration_valid_until {
            Some(until) => date <= until,
            None => false,
        }
    }
}

// =============================================================================
// Reading
// =============================================================================

/// The opening/closing meter values and payment breakdown recorded for one
/// nozzle in one shift.
///
/// At most one reading exists per (nozzle, shift-type, date). `total_sale_paise`
/// is the sum of the four payment columns, stored redundantly for display;
/// the engine recomputes it rather than trusting the stored copy.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Reading {
    pub id: String,
    pub outlet_id: String,
    pub nozzle_id: String,

    /// Attendant who worked the nozzle this shift.
    pub attendant_id: String,

    /// Product snapshot taken from the nozzle at record time.
    pub product_id: String,

    pub shift_type: ShiftType,
    #[ts(as = "String")]
    pub shift_date: NaiveDate,

    /// Opening meter value (millilitres).
    pub previous_reading_ml: i64,
    /// Closing meter value (millilitres).
    pub current_reading_ml: i64,
    /// Litres dispensed for calibration checks, excluded from sales.
    pub testing_ml: i64,

    /// Reported payment totals, one column per method (paise).
    pub cash_sales_paise: i64,
    pub credit_sales_paise: i64,
    pub upi_sales_paise: i64,
    pub card_sales_paise: i64,

    /// Sum of the four payment columns, stored redundantly for display.
    pub total_sale_paise: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Reading {
    /// The shift instance this reading belongs to.
    #[inline]
    pub fn shift_key(&self) -> ShiftKey {
        ShiftKey::new(self.shift_type, self.shift_date)
    }

    /// Opening meter value.
    #[inline]
    pub fn previous_reading(&self) -> Volume {
        Volume::from_milliliters(self.previous_reading_ml)
    }

    /// Closing meter value.
    #[inline]
    pub fn current_reading(&self) -> Volume {
        Volume::from_milliliters(self.current_reading_ml)
    }

    /// Testing volume (excluded from sellable litres).
    #[inline]
    pub fn testing(&self) -> Volume {
        Volume::from_milliliters(self.testing_ml)
    }

    /// Reported cash sales.
    #[inline]
    pub fn cash_sales(&self) -> Money {
        Money::from_paise(self.cash_sales_paise)
    }

    /// Reported credit sales.
    #[inline]
    pub fn credit_sales(&self) -> Money {
        Money::from_paise(self.credit_sales_paise)
    }

    /// Reported UPI sales.
    #[inline]
    pub fn upi_sales(&self) -> Money {
        Money::from_paise(self.upi_sales_paise)
    }

    /// Reported card sales.
    #[inline]
    pub fn card_sales(&self) -> Money {
        Money::from_paise(self.card_sales_paise)
    }

    /// The stored display total (see [`reconcile::actual_proceeds`]
    /// for the recomputed value the engine actually uses).
    ///
    /// [`reconcile::actual_proceeds`]: crate::reconcile::actual_proceeds
    #[inline]
    pub fn total_sale(&self) -> Money {
        Money::from_paise(self.total_sale_paise)
    }
}

// =============================================================================
// Product Rate
// =============================================================================

/// The price-per-litre in effect for one product in one shift, with the
/// optional density observation recorded alongside it.
///
/// Created or updated when a manager saves rates for a shift; read-only by
/// convention once a later shift begins (the lock is advisory, not enforced
/// by storage).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductRate {
    pub id: String,
    pub outlet_id: String,
    pub product_id: String,

    pub shift_type: ShiftType,
    #[ts(as = "String")]
    pub shift_date: NaiveDate,

    /// Price per litre (paise).
    pub rate_paise: i64,

    /// Observed density (centi kg/m³), if a sample was taken.
    pub observed_density_centi: Option<i64>,
    /// Observed temperature (deci °C), if a sample was taken.
    pub observed_temperature_deci: Option<i64>,
    /// Derived density at 15 °C (centi kg/m³); present only when both
    /// observations were.
    pub density_at_15c_centi: Option<i64>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl ProductRate {
    /// The shift instance this rate applies to.
    #[inline]
    pub fn shift_key(&self) -> ShiftKey {
        ShiftKey::new(self.shift_type, self.shift_date)
    }

    /// Price per litre.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_paise(self.rate_paise)
    }

    /// Observed density, if recorded.
    #[inline]
    pub fn observed_density(&self) -> Option<Density> {
        self.observed_density_centi.map(Density::from_centi)
    }

    /// Observed temperature, if recorded.
    #[inline]
    pub fn observed_temperature(&self) -> Option<Temperature> {
        self.observed_temperature_deci.map(Temperature::from_deci)
    }

    /// Stored density at 15 °C, if derived at save time.
    #[inline]
    pub fn density_at_15c(&self) -> Option<Density> {
        self.density_at_15c_centi.map(Density::from_centi)
    }

    /// Recomputes the 15 °C density from the stored observations.
    ///
    /// Returns `None` unless both observations are present and positive —
    /// the correction is only defined once a real sample was taken, and a
    /// zero value is how a blank form field arrives.
    pub fn derived_density_at_15c(&self) -> Option<Density> {
        let density = self.observed_density()?;
        let temperature = self.observed_temperature()?;
        if density.centi() <= 0 || temperature.deci() <= 0 {
            return None;
        }
        Some(density.corrected_to_15c(temperature))
    }
}

// =============================================================================
// Stock Entry
// =============================================================================

/// Opening stock, receipt, and invoice value recorded for one tank in one
/// shift.
///
/// Recorded values only - no arithmetic is derived here. The entity is part
/// of the engine because it shares the shift-scoping discipline with
/// readings: one entry per (tank, shift-type, date), upserted on save.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StockEntry {
    pub id: String,
    pub outlet_id: String,
    pub tank_id: String,

    pub shift_type: ShiftType,
    #[ts(as = "String")]
    pub shift_date: NaiveDate,

    /// Dip reading at shift start (millilitres).
    pub opening_stock_ml: i64,
    /// Fuel received during the shift (millilitres).
    pub receipt_ml: i64,
    /// Invoice value of the receipt (paise).
    pub invoice_value_paise: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl StockEntry {
    /// The shift instance this entry belongs to.
    #[inline]
    pub fn shift_key(&self) -> ShiftKey {
        ShiftKey::new(self.shift_type, self.shift_date)
    }

    /// Dip reading at shift start.
    #[inline]
    pub fn opening_stock(&self) -> Volume {
        Volume::from_milliliters(self.opening_stock_ml)
    }

    /// Fuel received during the shift.
    #[inline]
    pub fn receipt(&self) -> Volume {
        Volume::from_milliliters(self.receipt_ml)
    }

    /// Invoice value of the receipt.
    #[inline]
    pub fn invoice_value(&self) -> Money {
        Money::from_paise(self.invoice_value_paise)
    }
}

// =============================================================================
// Configuration Entities
// =============================================================================

/// An underground storage tank holding one product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Tank {
    pub id: String,
    pub outlet_id: String,
    pub product_id: String,

    /// Display name shown in stock entry forms ("Tank 1 - Petrol").
    pub name: String,

    /// Rated capacity (millilitres).
    pub capacity_ml: i64,

    /// Whether the tank is in service (soft delete).
    pub is_active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Tank {
    /// Rated capacity.
    #[inline]
    pub fn capacity(&self) -> Volume {
        Volume::from_milliliters(self.capacity_ml)
    }
}

/// A pump attendant who records readings during a shift.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Attendant {
    pub id: String,
    pub outlet_id: String,

    /// Display name shown in shift entry forms and summaries.
    pub name: String,

    /// Contact number, if recorded.
    pub phone: Option<String>,

    /// Whether the attendant is on the roster (soft delete).
    pub is_active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
