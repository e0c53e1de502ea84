//! # Repository Modules
//!
//! Database access organized by entity.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Organization                              │
//! │                                                                         │
//! │  Database (pool.rs)                                                    │
//! │       │                                                                 │
//! │       ├──► ReadingRepository  - readings, one per nozzle per shift     │
//! │       ├──► RateRepository     - per-shift product rates + density      │
//! │       ├──► StockRepository    - per-shift tank stock entries           │
//! │       └──► OutletRepository   - nozzles, tanks, attendants (config)    │
//! │                                                                         │
//! │  Each repository:                                                       │
//! │  • Owns a clone of the pool (cheap, Arc internally)                    │
//! │  • Returns forecourt_core entities                                     │
//! │  • Upserts on the shift-scoped natural key, never raw INSERT           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod outlet;
pub mod rate;
pub mod reading;
pub mod stock;

pub use outlet::OutletRepository;
pub use rate::RateRepository;
pub use reading::ReadingRepository;
pub use stock::StockRepository;
