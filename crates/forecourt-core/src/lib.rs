//! # forecourt-core: Pure Business Logic for Forecourt
//!
//! This crate is the **heart** of Forecourt, a retail fuel-outlet shift
//! reconciliation engine. It contains all business logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Forecourt Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web/API layer (external)                       │   │
//! │  │   Shift entry form ──► Summary view ──► Dashboard              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ forecourt-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ reconcile │  │ aggregate │  │   shift   │  │  measure  │  │   │
//! │  │   │ litres,   │  │ attendant │  │ soft lock │  │ density   │  │   │
//! │  │   │ shortage  │  │ summaries │  │ policy    │  │ at 15 °C  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               forecourt-db (Database Layer)                     │   │
//! │  │        SQLite repositories: readings, rates, stock, outlet      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Reading, ProductRate, StockEntry, Nozzle, ...)
//! - [`money`] - Money type with integer paise arithmetic (no floating point!)
//! - [`measure`] - Volume/Density/Temperature fixed-point types
//! - [`reconcile`] - Litres sold, proceeds, shortage, opening-reading prefill
//! - [`aggregate`] - Per-attendant shift summaries and grand totals
//! - [`shift`] - The soft shift-lock policy
//! - [`validation`] - Form-boundary validation and parsing
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every reconciliation is a deterministic function
//!    over its inputs (reading, matching rate, prior reading)
//! 2. **No I/O**: Database, network, clock access is FORBIDDEN here
//! 3. **Integer Fixed-Point**: Paise and millilitres (i64), never floats
//! 4. **Permissive Numerics**: Numeric oddities (negative litres, missing
//!    rate) are surfaced, never raised or clamped
//!
//! ## Example Usage
//!
//! ```rust
//! use forecourt_core::measure::Volume;
//! use forecourt_core::money::Money;
//! use forecourt_core::reconcile::liters_sold_from;
//!
//! // Meter shows 1150.000 L closing against 1000.000 L opening with
//! // 5.000 L dispensed for testing:
//! let sold = liters_sold_from(
//!     Volume::from_liters(1000),
//!     Volume::from_liters(1150),
//!     Volume::from_liters(5),
//! );
//! assert_eq!(sold, Volume::from_liters(145));
//!
//! // At ₹100.00/L the meter implies ₹14,500.00 of proceeds:
//! assert_eq!(sold.cost_at(Money::from_rupees(100)), Money::from_paise(1_450_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod error;
pub mod measure;
pub mod money;
pub mod reconcile;
pub mod shift;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use forecourt_core::Money` instead of
// `use forecourt_core::money::Money`

pub use aggregate::{aggregate_by_attendant, summarize_shift, AttendantSummary, ShiftSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use measure::{Density, Temperature, Volume};
pub use money::Money;
pub use reconcile::{compute_proceeds, liters_sold, rate_for, OpeningReading, Proceeds};
pub use shift::is_shift_editable;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default outlet ID for v0.1 (single-outlet runtime with multi-outlet schema)
///
/// v0.1 serves one retail outlet, but every table carries outlet_id so a
/// dealer group can be onboarded later without a schema change. This
/// constant is used throughout the codebase until outlet resolution becomes
/// dynamic.
pub const DEFAULT_OUTLET_ID: &str = "00000000-0000-0000-0000-000000000001";
