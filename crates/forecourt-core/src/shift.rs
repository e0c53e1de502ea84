//! # Shift Lock Policy
//!
//! Decides whether a shift instance's readings remain editable.
//!
//! ## The Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shift order within one date:   morning → evening → night              │
//! │                                                                         │
//! │  A shift is editable iff                                               │
//! │    • it has no successor shift-type (night), OR                        │
//! │    • the successor shift-type has zero readings for that date          │
//! │                                                                         │
//! │  Only the IMMEDIATE successor gates: a night reading does not lock     │
//! │  the morning shift, because evening data is what supersedes morning    │
//! │  entry in the back-office workflow.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Soft Lock
//! The policy is advisory. The UI disables the submit control when this
//! predicate is false; storage never rejects the write, and a back-office
//! correction that bypasses the gate is an accepted part of the domain. The
//! engine computes correctly for locked shifts either way.

use crate::types::{Reading, ShiftKey};

/// Whether readings for a shift instance may still be edited.
///
/// `readings` is the pool of recorded readings the decision is made
/// against - typically everything recorded for the shift's date. Readings
/// from other dates are ignored, so passing a wider set is harmless.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use forecourt_core::shift::is_shift_editable;
/// use forecourt_core::types::{ShiftKey, ShiftType};
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
/// let night = ShiftKey::new(ShiftType::Night, date);
///
/// // Night has no successor: always editable
/// assert!(is_shift_editable(night, &[]));
/// ```
pub fn is_shift_editable(shift: ShiftKey, readings: &[Reading]) -> bool {
    match shift.successor() {
        None => true,
        Some(next) => !readings.iter().any(|r| r.shift_key() == next),
    }
}
