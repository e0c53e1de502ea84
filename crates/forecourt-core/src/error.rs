//! # Error Types
//!
//! Domain-specific error types for forecourt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  forecourt-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  forecourt-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → (API layer) → user message        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! The reconciliation functions never fail on numeric edge cases. A missing
//! rate yields zero calculated proceeds and a flag; negative litres sold is
//! a visible anomaly; an absent rate list is an empty list. Errors here are
//! structural: a required field missing, or a caller-side gate firing.

use thiserror::Error;

use crate::types::ShiftKey;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced nozzle does not exist or is out of service.
    #[error("Nozzle not found: {0}")]
    NozzleNotFound(String),

    /// The referenced attendant does not exist or is off the roster.
    #[error("Attendant not found: {0}")]
    AttendantNotFound(String),

    /// The referenced tank does not exist or is out of service.
    #[error("Tank not found: {0}")]
    TankNotFound(String),

    /// A later shift already has recorded data.
    ///
    /// The lock is advisory: the engine computes correctly for locked
    /// shifts, and storage never rejects the write. API layers that choose
    /// to enforce the gate raise this before calling the repositories.
    #[error("Shift {shift} is locked: the {successor} shift already has readings")]
    ShiftLocked {
        shift: ShiftKey,
        successor: ShiftKey,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form input validation errors.
///
/// These occur before the reconciliation engine runs; the engine itself is
/// never called with missing required fields.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (non-numeric meter reading, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
