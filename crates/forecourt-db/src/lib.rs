//! # forecourt-db: Database Layer for Forecourt
//!
//! SQLite persistence for the shift reconciliation engine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Forecourt Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web/API layer (external)                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              forecourt-core (Business Logic)                    │   │
//! │  │              Pure functions, no I/O                             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           ★ forecourt-db (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐      │   │
//! │  │   │ readings │  │  rates   │  │  stock   │  │  outlet  │      │   │
//! │  │   │ repo     │  │  repo    │  │  repo    │  │  config  │      │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘      │   │
//! │  │                                                                 │   │
//! │  │   SQLite + sqlx • WAL mode • embedded migrations               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool configuration and the [`Database`] handle
//! - [`repository`] - Per-entity repositories (readings, rates, stock, outlet)
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Database error types
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use forecourt_db::{Database, DbConfig};
//! use forecourt_core::summarize_shift;
//!
//! let db = Database::new(DbConfig::new("./forecourt.db")).await?;
//!
//! let readings = db.readings().list_for_shift(shift).await?;
//! let rates = db.rates().list_for_shift(shift).await?;
//! let summary = summarize_shift(&readings, &rates);
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{OutletRepository, RateRepository, ReadingRepository, StockRepository};
