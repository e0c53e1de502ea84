//! # Measurement Types
//!
//! Fixed-point types for the physical quantities a fuel outlet records:
//! dispensed volume, observed density, and observed temperature.
//!
//! ## Fixed-Point Scales
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Type         Unit stored        Example                                │
//! │  ──────────   ────────────────   ───────────────────────────────        │
//! │  Volume       millilitres        145.000 L  = 145_000                   │
//! │  Density      centi kg/m³        750.00     =  75_000                   │
//! │  Temperature  deci °C            25.0 °C    =     250                   │
//! │                                                                         │
//! │  Meter totalisers show 3 decimals, density reports show 2, and         │
//! │  thermometers show 1 - each scale carries exactly what the outlet      │
//! │  instruments print, so round-tripping through storage is lossless.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Same discipline as [`Money`](crate::money::Money): signed i64 newtypes,
//! no floating point. Volumes can legitimately go negative when a closing
//! reading is entered below the opening reading - that anomaly must survive
//! the arithmetic so a dealer can see it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::money::{parse_scaled, Money};

/// Integer division rounding half away from zero.
///
/// Matches how the outlet's paper workflows round: 0.5 paise of proceeds
/// becomes 1 paise whether the value is a shortage or an excess.
const fn div_round_half_away(numerator: i128, denominator: i128) -> i64 {
    let half = denominator / 2;
    let adjusted = if numerator >= 0 {
        numerator + half
    } else {
        numerator - half
    };
    (adjusted / denominator) as i64
}

// =============================================================================
// Volume
// =============================================================================

/// A fuel volume in millilitres.
///
/// Used for meter readings, testing volume, litres sold, opening stock, and
/// receipts. Signed: litres sold is `closing − opening − testing` and the
/// engine never clamps an inconsistent entry to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Volume(i64);

impl Volume {
    /// Creates a Volume from millilitres.
    #[inline]
    pub const fn from_milliliters(ml: i64) -> Self {
        Volume(ml)
    }

    /// Creates a Volume from whole litres.
    ///
    /// ## Example
    /// ```rust
    /// use forecourt_core::measure::Volume;
    ///
    /// let sold = Volume::from_liters(145);
    /// assert_eq!(sold.milliliters(), 145_000);
    /// ```
    #[inline]
    pub const fn from_liters(liters: i64) -> Self {
        Volume(liters * 1000)
    }

    /// Returns the value in millilitres.
    #[inline]
    pub const fn milliliters(&self) -> i64 {
        self.0
    }

    /// Returns the whole-litre portion.
    #[inline]
    pub const fn liters(&self) -> i64 {
        self.0 / 1000
    }

    /// Returns the millilitre portion (always 0-999).
    #[inline]
    pub const fn milliliters_part(&self) -> i64 {
        (self.0 % 1000).abs()
    }

    /// Returns zero volume.
    #[inline]
    pub const fn zero() -> Self {
        Volume(0)
    }

    /// Checks if the volume is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the volume is negative (inconsistent meter entry).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses litre text from a form field (meter totaliser style,
    /// up to 3 decimals), treating blank or unparseable input as zero.
    ///
    /// ## Example
    /// ```rust
    /// use forecourt_core::measure::Volume;
    ///
    /// assert_eq!(Volume::parse_lenient("1150").milliliters(), 1_150_000);
    /// assert_eq!(Volume::parse_lenient("5.25").milliliters(), 5_250);
    /// assert_eq!(Volume::parse_lenient(""), Volume::zero());
    /// ```
    pub fn parse_lenient(input: &str) -> Self {
        Volume(parse_scaled(input, 1000).unwrap_or(0))
    }

    /// Values this volume at a per-litre rate.
    ///
    /// `145.000 L` at `₹100.00/L` is `₹14,500.00`. Fractional paise round
    /// half away from zero; a negative volume produces negative proceeds
    /// (the anomaly stays visible).
    ///
    /// ## Example
    /// ```rust
    /// use forecourt_core::measure::Volume;
    /// use forecourt_core::money::Money;
    ///
    /// let sold = Volume::from_liters(145);
    /// let rate = Money::from_rupees(100);
    /// assert_eq!(sold.cost_at(rate), Money::from_paise(1_450_000));
    /// ```
    pub fn cost_at(&self, rate_per_liter: Money) -> Money {
        let numerator = self.0 as i128 * rate_per_liter.paise() as i128;
        Money::from_paise(div_round_half_away(numerator, 1000))
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:03} L",
            sign,
            self.liters().abs(),
            self.milliliters_part()
        )
    }
}

impl Default for Volume {
    fn default() -> Self {
        Volume::zero()
    }
}

impl Add for Volume {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Volume(self.0 + other.0)
    }
}

impl AddAssign for Volume {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Volume {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Volume(self.0 - other.0)
    }
}

impl SubAssign for Volume {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Volume {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Volume(-self.0)
    }
}

impl Sum for Volume {
    fn sum<I: Iterator<Item = Volume>>(iter: I) -> Self {
        iter.fold(Volume::zero(), Add::add)
    }
}

// =============================================================================
// Density
// =============================================================================

/// An observed fuel density in centi kg/m³ (75_000 = 750.00 kg/m³).
///
/// Density enters the system on a product rate record alongside the observed
/// temperature, and [`Density::corrected_to_15c`] derives the 15 °C value
/// used for petroleum volume/quality accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Density(i64);

impl Density {
    /// Creates a Density from centi kg/m³.
    #[inline]
    pub const fn from_centi(centi: i64) -> Self {
        Density(centi)
    }

    /// Returns the value in centi kg/m³.
    #[inline]
    pub const fn centi(&self) -> i64 {
        self.0
    }

    /// Parses density text (2 decimals) from a form field; blank or
    /// unparseable input is zero, which callers treat as "not observed".
    pub fn parse_lenient(input: &str) -> Self {
        Density(parse_scaled(input, 100).unwrap_or(0))
    }

    /// Corrects this observed density to the reference temperature of 15 °C.
    ///
    /// Correction factor is `1 + 0.0008 × (T − 15)`; the result rounds to
    /// 2 decimal places (exact in centi fixed-point).
    ///
    /// Total over its declared domain: callers must skip the call when
    /// either observation is absent (the result of correcting a missing
    /// density is undefined, not zero), and semantic validation of absurd
    /// inputs belongs to the input layer, not here.
    ///
    /// ## Example
    /// ```rust
    /// use forecourt_core::measure::{Density, Temperature};
    ///
    /// let observed = Density::from_centi(75_000);      // 750.00 kg/m³
    /// let at_pump = Temperature::from_deci(250);       // 25.0 °C
    /// let corrected = observed.corrected_to_15c(at_pump);
    /// assert_eq!(corrected, Density::from_centi(75_600)); // 756.00 kg/m³
    /// ```
    pub fn corrected_to_15c(&self, observed_temperature: Temperature) -> Density {
        // factor × 1e5: 0.0008/°C is 8 per deci-degree at this scale
        let factor = 100_000 + 8 * (observed_temperature.deci() as i128 - 150);
        let numerator = self.0 as i128 * factor;
        Density(div_round_half_away(numerator, 100_000))
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} kg/m³",
            sign,
            (self.0 / 100).abs(),
            (self.0 % 100).abs()
        )
    }
}

// =============================================================================
// Temperature
// =============================================================================

/// An observed temperature in deci-degrees Celsius (250 = 25.0 °C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Temperature(i64);

impl Temperature {
    /// Creates a Temperature from deci-degrees Celsius.
    #[inline]
    pub const fn from_deci(deci: i64) -> Self {
        Temperature(deci)
    }

    /// Returns the value in deci-degrees Celsius.
    #[inline]
    pub const fn deci(&self) -> i64 {
        self.0
    }

    /// Parses temperature text (1 decimal) from a form field; blank or
    /// unparseable input is zero, which callers treat as "not observed".
    pub fn parse_lenient(input: &str) -> Self {
        Temperature(parse_scaled(input, 10).unwrap_or(0))
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{} °C", sign, (self.0 / 10).abs(), (self.0 % 10).abs())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
