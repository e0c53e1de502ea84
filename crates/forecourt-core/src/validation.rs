//! # Validation Module
//!
//! Form-boundary validation and parsing for shift entry.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields: attendant, nozzle, both meter readings           │
//! │  └── Text → fixed-point parsing (blank payment column = zero)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE natural keys (one reading per nozzle per shift)            │
//! │                                                                         │
//! │  The reconciliation engine is NEVER called with missing required       │
//! │  fields - rejection happens here first.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is deliberately NOT validated: `current >= previous`. An
//! inconsistent meter entry produces negative litres sold downstream, and
//! surfacing that anomaly is part of the business process.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::measure::{Density, Temperature, Volume};
use crate::money::{parse_scaled, Money};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a referenced entity id is present.
pub fn validate_id(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates and parses a required meter field.
///
/// Blank input is a required-field violation (an absent reading is not the
/// same as a zero reading); non-blank but non-numeric input is a format
/// error. Contrast with the payment columns, which are lenient.
pub fn validate_meter_field(field: &str, input: &str) -> ValidationResult<Volume> {
    if input.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    match parse_scaled(input, 1000) {
        Some(ml) => Ok(Volume::from_milliliters(ml)),
        None => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number with up to 3 decimal places".to_string(),
        }),
    }
}

/// Validates and parses a required rupee field.
pub fn validate_money_field(field: &str, input: &str) -> ValidationResult<Money> {
    if input.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    match parse_scaled(input, 100) {
        Some(paise) => Ok(Money::from_paise(paise)),
        None => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number with up to 2 decimal places".to_string(),
        }),
    }
}

// =============================================================================
// Reading Submission
// =============================================================================

/// Raw text of a shift entry form, exactly as submitted.
///
/// Persisted numeric fields arrive as text; this is the boundary where they
/// stop being text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingForm {
    pub attendant_id: String,
    pub nozzle_id: String,
    pub previous_reading: String,
    pub current_reading: String,
    pub testing: String,
    pub cash_sales: String,
    pub credit_sales: String,
    pub upi_sales: String,
    pub card_sales: String,
}

/// A validated, typed reading submission ready for upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingInput {
    pub attendant_id: String,
    pub nozzle_id: String,
    pub previous_reading: Volume,
    pub current_reading: Volume,
    pub testing: Volume,
    pub cash_sales: Money,
    pub credit_sales: Money,
    pub upi_sales: Money,
    pub card_sales: Money,
}

impl ReadingInput {
    /// The redundant display total stored on the reading row.
    pub fn total_sale(&self) -> Money {
        self.cash_sales + self.credit_sales + self.upi_sales + self.card_sales
    }
}

impl ReadingForm {
    /// Validates the form and produces a typed submission.
    ///
    /// ## Rules
    /// - `attendant_id`, `nozzle_id`: required
    /// - `previous_reading`, `current_reading`: required, numeric
    /// - `testing` and the four payment columns: lenient - blank or
    ///   unparseable text is zero
    ///
    /// The first violated rule is returned; the UI highlights one field at
    /// a time, matching the submit flow.
    pub fn validate(&self) -> ValidationResult<ReadingInput> {
        validate_id("attendant", &self.attendant_id)?;
        validate_id("nozzle", &self.nozzle_id)?;

        let previous_reading = validate_meter_field("opening reading", &self.previous_reading)?;
        let current_reading = validate_meter_field("closing reading", &self.current_reading)?;

        Ok(ReadingInput {
            attendant_id: self.attendant_id.trim().to_string(),
            nozzle_id: self.nozzle_id.trim().to_string(),
            previous_reading,
            current_reading,
            testing: Volume::parse_lenient(&self.testing),
            cash_sales: Money::parse_lenient(&self.cash_sales),
            credit_sales: Money::parse_lenient(&self.credit_sales),
            upi_sales: Money::parse_lenient(&self.upi_sales),
            card_sales: Money::parse_lenient(&self.card_sales),
        })
    }
}

// =============================================================================
// Product Rate Submission
// =============================================================================

/// Raw text of a rate entry form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateForm {
    pub rate: String,
    pub observed_density: String,
    pub observed_temperature: String,
}

/// A validated, typed rate submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateInput {
    pub rate: Money,
    pub observed_density: Option<Density>,
    pub observed_temperature: Option<Temperature>,
}

impl RateInput {
    /// Derives the 15 °C density when both observations are present and
    /// positive; otherwise the correction is skipped entirely.
    pub fn density_at_15c(&self) -> Option<Density> {
        let density = self.observed_density?;
        let temperature = self.observed_temperature?;
        if density.centi() <= 0 || temperature.deci() <= 0 {
            return None;
        }
        Some(density.corrected_to_15c(temperature))
    }
}

impl RateForm {
    /// Validates the form: the rate is required; the density observation
    /// fields are optional and blank means "no sample taken".
    pub fn validate(&self) -> ValidationResult<RateInput> {
        let rate = validate_money_field("rate", &self.rate)?;

        Ok(RateInput {
            rate,
            observed_density: parse_scaled(&self.observed_density, 100).map(Density::from_centi),
            observed_temperature: parse_scaled(&self.observed_temperature, 10)
                .map(Temperature::from_deci),
        })
    }
}

// =============================================================================
// Stock Entry Submission
// =============================================================================

/// Raw text of a stock entry form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockEntryForm {
    pub opening_stock: String,
    pub receipt: String,
    pub invoice_value: String,
}

/// A validated, typed stock entry submission. Pure recorded values - no
/// derived arithmetic happens on stock entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntryInput {
    pub opening_stock: Volume,
    pub receipt: Volume,
    pub invoice_value: Money,
}

impl StockEntryForm {
    /// Parses the form leniently: every field is optional recorded data and
    /// blank means zero.
    pub fn validate(&self) -> ValidationResult<StockEntryInput> {
        Ok(StockEntryInput {
            opening_stock: Volume::parse_lenient(&self.opening_stock),
            receipt: Volume::parse_lenient(&self.receipt),
            invoice_value: Money::parse_lenient(&self.invoice_value),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ReadingForm {
        ReadingForm {
            attendant_id: "att-1".into(),
            nozzle_id: "noz-1".into(),
            previous_reading: "1000".into(),
            current_reading: "1150".into(),
            testing: "5".into(),
            cash_sales: "5000".into(),
            credit_sales: "".into(),
            upi_sales: "9000".into(),
            card_sales: "".into(),
        }
    }

    #[test]
    fn test_valid_reading_form() {
        let input = filled_form().validate().unwrap();
        assert_eq!(input.previous_reading, Volume::from_liters(1000));
        assert_eq!(input.current_reading, Volume::from_liters(1150));
        assert_eq!(input.testing, Volume::from_liters(5));
        assert_eq!(input.cash_sales, Money::from_rupees(5000));
        assert_eq!(input.credit_sales, Money::zero());
        assert_eq!(input.total_sale(), Money::from_rupees(14_000));
    }

    #[test]
    fn test_reading_form_required_fields() {
        let mut form = filled_form();
        form.attendant_id = "  ".into();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Required { field }) if field == "attendant"
        ));

        let mut form = filled_form();
        form.nozzle_id = String::new();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Required { field }) if field == "nozzle"
        ));

        let mut form = filled_form();
        form.current_reading = String::new();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Required { field }) if field == "closing reading"
        ));
    }

    #[test]
    fn test_reading_form_meter_must_be_numeric() {
        let mut form = filled_form();
        form.previous_reading = "ten".into();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidFormat { field, .. }) if field == "opening reading"
        ));
    }

    #[test]
    fn test_reading_form_inconsistent_meters_pass_validation() {
        // Closing below opening is NOT rejected here: the engine surfaces
        // the negative litres instead.
        let mut form = filled_form();
        form.previous_reading = "1150".into();
        form.current_reading = "1000".into();
        let input = form.validate().unwrap();
        assert!((input.current_reading - input.previous_reading).is_negative());
    }

    #[test]
    fn test_reading_form_payment_columns_are_lenient() {
        let mut form = filled_form();
        form.cash_sales = "garbage".into();
        form.upi_sales = "  ".into();
        let input = form.validate().unwrap();
        assert_eq!(input.cash_sales, Money::zero());
        assert_eq!(input.upi_sales, Money::zero());
    }

    #[test]
    fn test_rate_form_requires_rate() {
        let form = RateForm {
            rate: String::new(),
            observed_density: "750.00".into(),
            observed_temperature: "25".into(),
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Required { field }) if field == "rate"
        ));
    }

    #[test]
    fn test_rate_form_density_observation_optional() {
        let form = RateForm {
            rate: "100".into(),
            observed_density: String::new(),
            observed_temperature: String::new(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.rate, Money::from_rupees(100));
        assert_eq!(input.observed_density, None);
        assert_eq!(input.density_at_15c(), None);
    }

    #[test]
    fn test_rate_form_full_observation_derives_density() {
        let form = RateForm {
            rate: "100".into(),
            observed_density: "750.00".into(),
            observed_temperature: "25".into(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.density_at_15c(), Some(Density::from_centi(75_600)));
    }

    #[test]
    fn test_stock_entry_form_is_fully_lenient() {
        let form = StockEntryForm {
            opening_stock: "12000".into(),
            receipt: "".into(),
            invoice_value: "junk".into(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.opening_stock, Volume::from_liters(12_000));
        assert_eq!(input.receipt, Volume::zero());
        assert_eq!(input.invoice_value, Money::zero());
    }
}
